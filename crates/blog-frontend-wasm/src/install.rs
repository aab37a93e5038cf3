//! Per-behavior installation.
//!
//! Each page behavior attaches on its own. A behavior that fails to install
//! is reported to the console and the rest still attach.

use blog_frontend_core::{DevConsole, FrontendResult};

/// Unwrap one installer's result, reporting a failure as `"{behavior}: {error}"`.
pub fn settle<T, C>(console: &C, behavior: &str, result: FrontendResult<T>) -> T
where
    T: Default,
    C: DevConsole,
{
    result.unwrap_or_else(|e| {
        tracing::warn!(behavior, error = %e, "behavior not installed");
        console.error(&format!("{behavior}: {e}"));
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_frontend_core::FrontendError;
    use blog_frontend_core::recording::{Call, RecordingHost};

    #[test]
    fn failed_behavior_does_not_stop_later_ones() {
        let host = RecordingHost::default();
        let toggles = settle(&host, "password toggles", Ok(2_u32));
        let guard: bool = settle(
            &host,
            "form guard",
            Err(FrontendError::ElementNotFound("title".into())),
        );
        let search = settle(&host, "search gate", Ok(true));
        let autocomplete = settle(&host, "recipient autocomplete", Ok(true));

        assert_eq!(toggles, 2);
        assert!(!guard);
        assert!(search);
        assert!(autocomplete);
        assert_eq!(
            host.calls(),
            [Call::Error("form guard: Element not found: title".into())]
        );
    }

    #[test]
    fn success_is_silent() {
        let host = RecordingHost::default();
        assert_eq!(settle(&host, "password toggles", Ok(0_u32)), 0);
        assert!(host.calls().is_empty());
    }
}
