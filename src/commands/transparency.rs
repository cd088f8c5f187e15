//! Transparency command arguments
//!
//! The host hands the command a loose option map:
//! `{ "opt": "val" | "inc" | "dec", "val": <integer> }`.
//! It is decoded here, once, into an `AlphaOperation`.

use serde_json::{Map, Value};

use crate::core::error::CommandError;
use crate::transparency::AlphaOperation;

/// Option key selecting the operation
pub const OPT_KEY: &str = "opt";

/// Option key carrying the absolute value
pub const VAL_KEY: &str = "val";

/// Operation name used when `opt` is absent
pub const DEFAULT_OPT: &str = "val";

/// Decode the host's option map.
///
/// - `opt` defaults to `"val"`; an unknown name falls back to `"val"`
/// - `val` defaults to 0 and must be an integer for every operation, though
///   `"inc"` and `"dec"` ignore its value
pub fn decode_operation(args: &Map<String, Value>) -> Result<AlphaOperation, CommandError> {
    let opt = match args.get(OPT_KEY) {
        None | Some(Value::Null) => DEFAULT_OPT,
        Some(Value::String(s)) => s.as_str(),
        Some(other) => return Err(invalid(OPT_KEY, other)),
    };

    let value = decode_value(args)?;

    match opt {
        "inc" => Ok(AlphaOperation::increase()),
        "dec" => Ok(AlphaOperation::decrease()),
        "val" => Ok(AlphaOperation::SetTo(value)),
        unknown => {
            tracing::warn!(opt = unknown, "Unknown transparency operation, treating as \"val\"");
            Ok(AlphaOperation::SetTo(value))
        }
    }
}

fn decode_value(args: &Map<String, Value>) -> Result<i64, CommandError> {
    let Some(value) = args.get(VAL_KEY) else {
        return Ok(0);
    };

    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(v)
            } else if n.as_u64().is_some() {
                // Only u64 values above i64::MAX land here
                Ok(i64::MAX)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() => Ok(f.trunc() as i64),
                    _ => Err(invalid(VAL_KEY, value)),
                }
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid(VAL_KEY, value)),
        _ => Err(invalid(VAL_KEY, value)),
    }
}

fn invalid(field: &str, value: &Value) -> CommandError {
    CommandError::InvalidArgument {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Build an option map from command-line arguments.
///
/// Each argument is either a JSON object, merged in, or a `key=value` pair
/// whose value is kept as a string.
pub fn args_from_cli<I, S>(args: I) -> Result<Map<String, Value>, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = Map::new();
    for arg in args {
        let arg = arg.as_ref().trim();
        if arg.starts_with('{') {
            match serde_json::from_str::<Value>(arg) {
                Ok(Value::Object(object)) => map.extend(object),
                _ => {
                    return Err(CommandError::InvalidArgument {
                        field: "arguments".to_string(),
                        value: arg.to_string(),
                    })
                }
            }
        } else if let Some((key, value)) = arg.split_once('=') {
            map.insert(key.trim().to_string(), Value::String(value.trim().to_string()));
        } else {
            return Err(CommandError::InvalidArgument {
                field: "arguments".to_string(),
                value: arg.to_string(),
            });
        }
    }
    Ok(map)
}
