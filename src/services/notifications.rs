//! Transient, user-facing notifications (the snack-bar channel).
//!
//! Services never render errors themselves; callers turn a [`ServiceError`]
//! into a [`Notification`] and hand it to a [`Notifier`].

use std::collections::HashSet;

use tokio::sync::mpsc;

use crate::services::{ServiceError, ServiceResult};

pub const MSG_UNAUTHORIZED: &str = "No tiene permisos para realizar esta acción.";
pub const MSG_NOT_FOUND: &str = "El registro solicitado no existe.";
pub const MSG_SEARCH_FAILED: &str = "No se pudieron obtener los resultados.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Maps a notification level to the CSS class used by the snack-bar.
pub fn level_to_str(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Error => "danger",
        NotificationLevel::Warning => "warning",
        NotificationLevel::Success => "success",
        NotificationLevel::Info => "info",
    }
}

/// Strips markup from a backend-provided message before it is displayed.
///
/// The result is plain text: entities escaped while cleaning are decoded
/// again.
pub fn sanitize_message(message: &str) -> String {
    let cleaned = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(message)
        .to_string();

    unescape_entities(&cleaned).trim().to_string()
}

fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Builds the notification shown when a mutation fails.
///
/// `fallback` is used for errors that carry no user-facing message.
pub fn notification_for(err: &ServiceError, fallback: &str) -> Notification {
    match err {
        ServiceError::Form(message) => Notification::warning(message.clone()),
        ServiceError::Conflict { message, .. } => Notification::error(message.clone()),
        ServiceError::Backend(message) => {
            let message = sanitize_message(message);
            if message.is_empty() {
                Notification::error(fallback)
            } else {
                Notification::error(message)
            }
        }
        ServiceError::Unauthorized => Notification::error(MSG_UNAUTHORIZED),
        ServiceError::NotFound => Notification::error(MSG_NOT_FOUND),
        ServiceError::TypeConstraint(_) | ServiceError::Internal(_) => {
            Notification::error(fallback)
        }
    }
}

/// Success message and generic failure message of one user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionMessages {
    pub success: &'static str,
    pub failure: &'static str,
}

impl ActionMessages {
    pub const fn new(success: &'static str, failure: &'static str) -> Self {
        Self { success, failure }
    }

    /// Notification for the outcome of the action.
    pub fn notification<T>(&self, result: &ServiceResult<T>) -> Notification {
        match result {
            Ok(_) => Notification::success(self.success),
            Err(err) => notification_for(err, self.failure),
        }
    }
}

/// Receives notifications for display.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications over an unbounded tokio channel.
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            log::debug!("Notification dropped: no receiver");
        }
    }
}

/// Writes notifications to the log, for headless callers.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => log::error!("{}", notification.message),
            NotificationLevel::Warning => log::warn!("{}", notification.message),
            _ => log::info!("{}", notification.message),
        }
    }
}
