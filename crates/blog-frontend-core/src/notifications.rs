//! Notification actions: confirm, request, then reload.
//!
//! | Action          | Method | Path                          | On success     |
//! |-----------------|--------|-------------------------------|----------------|
//! | Delete one      | DELETE | `/delete_notification/{id}/` | reload         |
//! | Mark one viewed | POST   | `/mark_as_viewed/{id}/`       | reload         |
//! | Delete all      | POST   | `/delete_all_notifications/`  | alert + reload |
//! | Mark all viewed | POST   | `/mark_all_as_viewed/`        | alert + reload |
//!
//! Failures only reach the developer console. Declining an "all" action
//! suppresses the triggering element's default action and logs a notice;
//! declining a single-item action does neither.

use crate::config::FrontendConfig;
use crate::host::{DevConsole, Dialogs, Navigation};
use crate::http::{HttpMethod, HttpRequest, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    Delete(i64),
    MarkViewed(i64),
    DeleteAll,
    MarkAllViewed,
}

impl NotificationAction {
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Delete(_) => HttpMethod::Delete,
            Self::MarkViewed(_) | Self::DeleteAll | Self::MarkAllViewed => HttpMethod::Post,
        }
    }

    #[must_use]
    pub fn path(self, config: &FrontendConfig) -> String {
        let endpoints = &config.endpoints;
        match self {
            Self::Delete(id) => format!("{}{id}/", endpoints.delete_notification),
            Self::MarkViewed(id) => format!("{}{id}/", endpoints.mark_as_viewed),
            Self::DeleteAll => endpoints.delete_all_notifications.clone(),
            Self::MarkAllViewed => endpoints.mark_all_as_viewed.clone(),
        }
    }

    #[must_use]
    pub fn confirm_message(self, config: &FrontendConfig) -> &str {
        let messages = &config.messages;
        match self {
            Self::Delete(_) => &messages.confirm_delete,
            Self::MarkViewed(_) => &messages.confirm_mark_viewed,
            Self::DeleteAll => &messages.confirm_delete_all,
            Self::MarkAllViewed => &messages.confirm_mark_all_viewed,
        }
    }

    /// Alert shown before reloading, for the "all" variants.
    #[must_use]
    pub fn success_alert(self, config: &FrontendConfig) -> Option<&str> {
        match self {
            Self::DeleteAll => Some(&config.messages.deleted_all),
            Self::MarkAllViewed => Some(&config.messages.marked_all_viewed),
            Self::Delete(_) | Self::MarkViewed(_) => None,
        }
    }

    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Delete(_) => "Failed to delete notification",
            Self::MarkViewed(_) => "Failed to mark notification as viewed",
            Self::DeleteAll => "Failed to delete all notifications",
            Self::MarkAllViewed => "Failed to mark all notifications as viewed",
        }
    }

    /// Console notice logged on decline, for the "all" variants.
    #[must_use]
    pub fn decline_notice(self, config: &FrontendConfig) -> Option<&str> {
        match self {
            Self::DeleteAll => Some(&config.messages.cancelled_delete_all),
            Self::MarkAllViewed => Some(&config.messages.cancelled_mark_all_viewed),
            Self::Delete(_) | Self::MarkViewed(_) => None,
        }
    }

    #[must_use]
    pub const fn suppresses_default_on_decline(self) -> bool {
        matches!(self, Self::DeleteAll | Self::MarkAllViewed)
    }

    #[must_use]
    pub fn request(self, config: &FrontendConfig, csrf_token: Option<&str>) -> HttpRequest {
        HttpRequest::protected(self.method(), self.path(config), config, csrf_token)
    }
}

/// How an action ended. The caller maps `suppress_default` onto the
/// triggering event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Declined { suppress_default: bool },
    Completed,
    Failed,
}

impl ActionOutcome {
    #[must_use]
    pub const fn suppress_default(self) -> bool {
        matches!(
            self,
            Self::Declined {
                suppress_default: true
            }
        )
    }
}

/// Run one action to completion against `host`.
pub async fn run_action<H>(
    host: &H,
    config: &FrontendConfig,
    csrf_token: Option<&str>,
    action: NotificationAction,
) -> ActionOutcome
where
    H: Dialogs + DevConsole + Navigation + Transport,
{
    if host.confirm(action.confirm_message(config)).await {
        perform(host, config, csrf_token, action).await
    } else {
        decline(host, config, action)
    }
}

/// Decline branch: log the notice (if any) and report whether the
/// triggering default action must be suppressed.
///
/// Synchronous so a browser host can call `preventDefault` before the
/// event handler returns.
pub fn decline<C: DevConsole>(
    console: &C,
    config: &FrontendConfig,
    action: NotificationAction,
) -> ActionOutcome {
    if let Some(notice) = action.decline_notice(config) {
        console.log(notice);
    }
    tracing::info!(?action, "notification action declined");
    ActionOutcome::Declined {
        suppress_default: action.suppresses_default_on_decline(),
    }
}

/// Confirmed branch: send the request and apply the success effects.
pub async fn perform<H>(
    host: &H,
    config: &FrontendConfig,
    csrf_token: Option<&str>,
    action: NotificationAction,
) -> ActionOutcome
where
    H: Dialogs + DevConsole + Navigation + Transport,
{
    let request = action.request(config, csrf_token);
    tracing::debug!(method = %request.method, url = %request.url, "notification request");

    match host.send(request).await {
        Ok(response) if response.is_success() => {
            if let Some(alert) = action.success_alert(config) {
                host.alert(alert);
            }
            host.reload();
            ActionOutcome::Completed
        }
        Ok(response) => {
            tracing::warn!(?action, status = response.status, "notification request rejected");
            host.error(action.failure_message());
            ActionOutcome::Failed
        }
        Err(e) => {
            tracing::warn!(?action, error = %e, "notification request failed");
            host.error(&format!("Error: {e}"));
            ActionOutcome::Failed
        }
    }
}
