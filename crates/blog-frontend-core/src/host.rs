//! Page-host seams: dialogs, the developer console, and navigation.
//!
//! Confirmation is async so a host can back it with a modal instead of the
//! blocking `window.confirm`.

/// Blocking-style user dialogs.
#[allow(async_fn_in_trait)]
pub trait Dialogs {
    /// Ask the user to confirm. `false` means declined.
    async fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}

/// Developer-facing log channel. Never shown to the user.
pub trait DevConsole {
    fn log(&self, message: &str);

    fn error(&self, message: &str);
}

pub trait Navigation {
    fn reload(&self);
}
