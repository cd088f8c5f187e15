//! Tests for the transparency state machine

use std::sync::Arc;

use crate::core::error::{OsError, TransparencyError};
use crate::os::{has_layered_bit, LayeredWindowApi, OsVersion, CALL_SET_ALPHA, CALL_SET_STYLE};
use crate::testing::FakeLayeredWindows;

use super::*;

const HWND: usize = 0x1000;

fn controller(platform: &Arc<FakeLayeredWindows>) -> AlphaController {
    AlphaController::new(platform.clone())
}

mod direct_backend {
    use super::*;

    #[test]
    fn test_modern_os_selects_direct() {
        let platform = Arc::new(FakeLayeredWindows::new(OsVersion::new(6, 0)).with_window(HWND));
        assert_eq!(controller(&platform).backend_kind(), BackendKind::Direct);
    }

    #[test]
    fn test_failed_probe_selects_direct() {
        let platform = Arc::new(FakeLayeredWindows::without_version().with_window(HWND));
        assert_eq!(controller(&platform).backend_kind(), BackendKind::Direct);
    }

    #[test]
    fn test_fresh_window_reads_opaque() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let mut controller = controller(&platform);
        assert_eq!(controller.get_alpha(HWND).unwrap(), 255);
    }

    #[test]
    fn test_get_after_set_returns_clamped() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let mut controller = controller(&platform);

        assert_eq!(controller.set_alpha(HWND, 200).unwrap().get(), 200);
        assert_eq!(controller.get_alpha(HWND).unwrap(), 200);

        assert_eq!(controller.set_alpha(HWND, 20).unwrap().get(), 150);
        assert_eq!(controller.get_alpha(HWND).unwrap(), 150);

        assert_eq!(controller.set_alpha(HWND, 9000).unwrap().get(), 255);
        assert_eq!(controller.get_alpha(HWND).unwrap(), 255);
    }

    #[test]
    fn test_reads_value_set_by_someone_else() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_layered_window(HWND, 90));
        let mut controller = controller(&platform);

        // Below the floor, but reported as-is
        assert_eq!(controller.get_alpha(HWND).unwrap(), 90);
        assert_eq!(controller.increase_alpha(HWND).unwrap().get(), 150);
    }

    #[test]
    fn test_set_makes_window_layered_with_alpha_blend() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let mut controller = controller(&platform);

        controller.set_alpha(HWND, 180).unwrap();
        let window = platform.window(HWND).unwrap();
        assert!(has_layered_bit(window.ex_style));
        assert_eq!(window.alpha, 180);
    }

    #[test]
    fn test_style_written_at_most_once() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let mut controller = controller(&platform);

        controller.set_alpha(HWND, 200).unwrap();
        controller.set_alpha(HWND, 210).unwrap();
        controller.decrease_alpha(HWND).unwrap();

        assert_eq!(platform.style_writes(), 1);
        assert_eq!(platform.alpha_writes(), 3);
    }

    #[test]
    fn test_existing_style_bits_preserved() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        platform.set_window_ex_style(HWND, 0x0000_0100).unwrap();
        let mut controller = controller(&platform);

        controller.set_alpha(HWND, 200).unwrap();
        let style = platform.window(HWND).unwrap().ex_style;
        assert_eq!(style, 0x0000_0100 | crate::os::LAYERED_STYLE_BIT);
    }
}

mod cached_backend {
    use super::*;

    #[test]
    fn test_legacy_os_selects_cached() {
        let platform = Arc::new(FakeLayeredWindows::new(OsVersion::new(5, 1)).with_window(HWND));
        assert_eq!(controller(&platform).backend_kind(), BackendKind::Cached);
    }

    #[test]
    fn test_unset_window_reads_opaque() {
        let platform = Arc::new(FakeLayeredWindows::legacy().with_layered_window(HWND, 170));
        let mut controller = controller(&platform);

        // The OS says 170 but nothing was set through the controller yet
        assert_eq!(controller.get_alpha(HWND).unwrap(), 255);
    }

    #[test]
    fn test_cache_survives_lost_os_attributes() {
        let platform = Arc::new(FakeLayeredWindows::legacy().with_window(HWND));
        let mut controller = controller(&platform);

        controller.set_alpha(HWND, 190).unwrap();
        platform.lose_attributes();

        assert_eq!(controller.get_alpha(HWND).unwrap(), 190);
        assert_eq!(controller.decrease_alpha(HWND).unwrap().get(), 180);
    }

    #[test]
    fn test_direct_backend_is_fooled_by_lost_attributes() {
        let platform = Arc::new(FakeLayeredWindows::legacy().with_window(HWND));
        let mut controller = AlphaController::with_backend(platform.clone(), BackendKind::Direct);

        controller.set_alpha(HWND, 190).unwrap();
        platform.lose_attributes();

        assert_eq!(controller.get_alpha(HWND).unwrap(), 255);
    }

    #[test]
    fn test_cache_is_per_window() {
        let platform = Arc::new(FakeLayeredWindows::legacy().with_window(1).with_window(2));
        let mut controller = controller(&platform);

        controller.set_alpha(1, 160).unwrap();
        assert_eq!(controller.get_alpha(1).unwrap(), 160);
        assert_eq!(controller.get_alpha(2).unwrap(), 255);
    }

    #[test]
    fn test_forget_window_resets_cache() {
        let platform = Arc::new(FakeLayeredWindows::legacy().with_window(HWND));
        let mut controller = controller(&platform);

        controller.set_alpha(HWND, 160).unwrap();
        controller.forget_window(HWND);
        assert_eq!(controller.get_alpha(HWND).unwrap(), 255);
    }
}

mod stepping {
    use super::*;

    #[test]
    fn test_increase_saturates_at_opaque() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let mut controller = controller(&platform);

        controller.set_alpha(HWND, 240).unwrap();
        assert_eq!(controller.increase_alpha(HWND).unwrap().get(), 250);
        assert_eq!(controller.increase_alpha(HWND).unwrap().get(), 255);
        assert_eq!(controller.increase_alpha(HWND).unwrap().get(), 255);
    }

    #[test]
    fn test_decrease_stops_at_floor() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let mut controller = controller(&platform);

        controller.set_alpha(HWND, 155).unwrap();
        assert_eq!(controller.decrease_alpha(HWND).unwrap().get(), 150);
        assert_eq!(controller.decrease_alpha(HWND).unwrap().get(), 150);
    }

    #[test]
    fn test_decrease_from_fresh_window() {
        let platform = Arc::new(FakeLayeredWindows::legacy().with_window(HWND));
        let mut controller = controller(&platform);
        assert_eq!(controller.decrease_alpha(HWND).unwrap().get(), 245);
    }

    #[test]
    fn test_apply_dispatches_every_operation() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let mut controller = controller(&platform);

        assert_eq!(controller.apply(HWND, AlphaOperation::SetTo(200)).unwrap().get(), 200);
        assert_eq!(controller.apply(HWND, AlphaOperation::IncreaseBy(5)).unwrap().get(), 205);
        assert_eq!(controller.apply(HWND, AlphaOperation::DecreaseBy(25)).unwrap().get(), 180);
    }
}

mod failures {
    use super::*;

    #[test]
    fn test_alpha_failure_restores_style() {
        let platform = Arc::new(FakeLayeredWindows::legacy().with_window(HWND));
        let mut controller = controller(&platform);
        platform.fail_call(CALL_SET_ALPHA);

        let err = controller.set_alpha(HWND, 180).unwrap_err();
        assert!(matches!(
            err,
            TransparencyError::Os(OsError::PlatformCallFailed { call, .. }) if call == CALL_SET_ALPHA
        ));

        let window = platform.window(HWND).unwrap();
        assert!(!has_layered_bit(window.ex_style));
        // Cache untouched
        assert_eq!(controller.get_alpha(HWND).unwrap(), 255);
    }

    #[test]
    fn test_alpha_failure_keeps_existing_layered_style() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_layered_window(HWND, 200));
        let mut controller = controller(&platform);
        platform.fail_call(CALL_SET_ALPHA);

        assert!(controller.set_alpha(HWND, 150).is_err());
        let window = platform.window(HWND).unwrap();
        assert!(has_layered_bit(window.ex_style));
        assert_eq!(window.alpha, 200);
        assert_eq!(platform.style_writes(), 0);
    }

    #[test]
    fn test_style_failure_applies_nothing() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let mut controller = controller(&platform);
        platform.fail_call(CALL_SET_STYLE);

        assert!(controller.set_alpha(HWND, 180).is_err());
        assert_eq!(platform.alpha_writes(), 0);
        assert_eq!(platform.window(HWND).unwrap().alpha, 0);
    }

    #[test]
    fn test_unknown_window_fails() {
        let platform = Arc::new(FakeLayeredWindows::modern());
        let mut controller = controller(&platform);

        assert!(controller.set_alpha(HWND, 200).is_err());
        assert!(controller.get_alpha(HWND).is_err());
    }
}

mod baseline {
    use super::*;
    use crate::host::WindowHandle;
    use crate::testing::RecordingHost;
    use parking_lot::Mutex;

    #[test]
    fn test_baseline_on_live_window() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let host = Arc::new(RecordingHost::new(platform.clone()));
        let controller = Arc::new(Mutex::new(controller(&platform)));

        let outcome = BaselineTask::new(WindowHandle(HWND as u64), host, controller).run();
        assert_eq!(outcome, Some(BaselineOutcome { hwnd: HWND, alpha: Alpha::OPAQUE }));

        let window = platform.window(HWND).unwrap();
        assert!(has_layered_bit(window.ex_style));
        assert_eq!(window.alpha, 255);
    }

    #[test]
    fn test_baseline_on_closed_window_is_noop() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let host = Arc::new(RecordingHost::new(platform.clone()));
        let controller = Arc::new(Mutex::new(controller(&platform)));
        platform.close_window(HWND);

        let outcome = BaselineTask::new(WindowHandle(HWND as u64), host.clone(), controller).run();
        assert!(outcome.is_none());
        assert_eq!(platform.style_writes(), 0);
        assert!(host.notices().is_empty());
    }

    #[test]
    fn test_baseline_failure_is_swallowed() {
        let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
        let host = Arc::new(RecordingHost::new(platform.clone()));
        let controller = Arc::new(Mutex::new(controller(&platform)));
        platform.fail_call(CALL_SET_ALPHA);

        let outcome = BaselineTask::new(WindowHandle(HWND as u64), host, controller).run();
        assert!(outcome.is_none());
    }
}

/// Property-based tests for clamping and stepping
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Every requested value lands in [150, 255]; in-range values are untouched
        #[test]
        fn clamp_stays_in_range(v in any::<i64>()) {
            let alpha = Alpha::clamped(v).get();
            prop_assert!((MIN_ALPHA..=MAX_ALPHA).contains(&alpha));
            if v >= MAX_ALPHA as i64 {
                prop_assert_eq!(alpha, MAX_ALPHA);
            } else if v <= MIN_ALPHA as i64 {
                prop_assert_eq!(alpha, MIN_ALPHA);
            } else {
                prop_assert_eq!(alpha as i64, v);
            }
        }

        /// Direct backend reads back exactly what was applied
        #[test]
        fn direct_get_after_set(v in -1000i64..1000i64) {
            let platform = Arc::new(FakeLayeredWindows::modern().with_window(HWND));
            let mut controller = AlphaController::new(platform);
            let applied = controller.set_alpha(HWND, v).unwrap();
            prop_assert_eq!(controller.get_alpha(HWND).unwrap(), applied.get());
            prop_assert_eq!(applied, Alpha::clamped(v));
        }

        /// Any sequence of steps stays within bounds on both backends
        #[test]
        fn steps_never_leave_range(
            start in 150i64..=255i64,
            steps in prop::collection::vec(any::<bool>(), 1..40),
            legacy in any::<bool>()
        ) {
            let platform = Arc::new(if legacy {
                FakeLayeredWindows::legacy().with_window(HWND)
            } else {
                FakeLayeredWindows::modern().with_window(HWND)
            });
            let mut controller = AlphaController::new(platform);
            let mut expected = controller.set_alpha(HWND, start).unwrap().get() as i64;

            for up in steps {
                let applied = if up {
                    controller.increase_alpha(HWND).unwrap()
                } else {
                    controller.decrease_alpha(HWND).unwrap()
                };
                expected = if up { expected + 10 } else { expected - 10 }.clamp(150, 255);
                prop_assert_eq!(applied.get() as i64, expected);
            }
        }
    }
}
