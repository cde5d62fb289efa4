//! Push Channel.
//!
//! Tracks the browser's notification permission and the one-time
//! registration of the push delivery token. Platform calls (asking for
//! permission, obtaining the token, receiving foreground messages) happen in
//! the renderer, which reports their outcome here.

use std::fmt;

use crate::model::notification::{NotificationEvent, PushMessageDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushState {
    Unregistered,
    PermissionRequested,
    Granted,
    Denied,
}

impl fmt::Display for PushState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unregistered => "unregistered",
            Self::PermissionRequested => "permission requested",
            Self::Granted => "granted",
            Self::Denied => "denied",
        };
        f.write_str(name)
    }
}

/// The browser's answer to a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// The prompt was dismissed without a decision.
    Default,
}

impl Permission {
    /// Parses `Notification.permission` values.
    pub fn parse(value: &str) -> Self {
        match value {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            _ => Self::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushChannel {
    state: PushState,
    /// Set once a registration was attempted in this page load.
    registration_claimed: bool,
}

impl Default for PushChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PushChannel {
    pub fn new() -> Self {
        Self {
            state: PushState::Unregistered,
            registration_claimed: false,
        }
    }

    pub fn state(&self) -> PushState {
        self.state
    }

    /// Moves to `PermissionRequested`.
    ///
    /// # Returns
    /// - `true` - The renderer should show the browser prompt
    /// - `false` - A prompt is pending or was already answered
    pub fn begin_permission_request(&mut self) -> bool {
        if self.state != PushState::Unregistered {
            return false;
        }
        self.state = PushState::PermissionRequested;
        true
    }

    /// Records the browser's answer. A dismissed prompt returns to
    /// `Unregistered` so it can be shown again on the next page load.
    pub fn permission_resolved(&mut self, permission: Permission) {
        self.state = match permission {
            Permission::Granted => PushState::Granted,
            Permission::Denied => PushState::Denied,
            Permission::Default => PushState::Unregistered,
        };
    }

    /// Whether the persistent "notifications are disabled" warning is shown.
    pub fn needs_permission_warning(&self) -> bool {
        self.state == PushState::Denied
    }

    /// Claims the single registration allowed per page load.
    ///
    /// # Returns
    /// - `true` - Permission is granted and no registration was attempted yet
    /// - `false` - Not granted, or already attempted (successfully or not)
    pub fn claim_registration(&mut self) -> bool {
        if self.state != PushState::Granted || self.registration_claimed {
            return false;
        }
        self.registration_claimed = true;
        true
    }

    /// Normalizes a received message, or `None` while permission is not granted.
    pub fn accept(&self, message: &PushMessageDto) -> Option<NotificationEvent> {
        if self.state != PushState::Granted {
            return None;
        }
        Some(NotificationEvent::from_push(message))
    }
}
