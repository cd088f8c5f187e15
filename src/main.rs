//! Window Transparency - command line entry point
//!
//! Applies one transparency command to the foreground window, e.g.
//! `window-transparency opt=inc` or `window-transparency '{"opt":"val","val":200}'`.

use std::process::ExitCode;
use std::sync::Arc;

use window_transparency::commands::args_from_cli;
use window_transparency::config::{AppConfig, ConfigStore, ConfigStoreConfig};
use window_transparency::core::error::{ErrorRecovery, RecoveryAction};
use window_transparency::host::{ForegroundHost, TokioScheduler};
use window_transparency::logging::LoggingSystem;
use window_transparency::os::PlatformLayeredApi;
use window_transparency::{EditorHost, TransparencyError, TransparencyPlugin};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Configuration problems are reported but never fatal
    let (config, config_error) = match ConfigStore::new(ConfigStoreConfig::default()).await {
        Ok(store) => (store.get().await, None),
        Err(e) => (AppConfig::default(), Some(TransparencyError::from(e))),
    };

    let _logging_system = match LoggingSystem::init(config.logging.clone()) {
        Ok(system) => Some(system),
        Err(e) => {
            // Fall back to basic logging if the configured output can't be set up
            eprintln!("Failed to initialize logging system: {}. Using basic logging.", e);
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::WARN.into()),
                )
                .init();
            None
        }
    };

    let platform = Arc::new(PlatformLayeredApi::new());
    let host = Arc::new(ForegroundHost::new(platform.clone()));

    if let Some(e) = config_error {
        tracing::warn!("Using default configuration: {}", e);
        if e.recovery_action() == RecoveryAction::NotifyUser {
            host.notify(&format!("Window transparency: {}", e));
        }
    }

    let plugin = TransparencyPlugin::new(
        host,
        platform,
        Arc::new(TokioScheduler::current()),
        config.transparency,
    );

    let args = match args_from_cli(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::from(2));
        }
    };

    // Failures were already logged and, where needed, shown by the plugin
    match plugin.run_command(&args) {
        Ok(alpha) => {
            println!("{}", alpha);
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
