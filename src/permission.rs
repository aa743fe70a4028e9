//! Gallery read permission states and the permission dialog logic.

use std::fmt;

/// Result of checking or requesting gallery read access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    ShouldAsk,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::Granted => "Granted",
            Permission::Denied => "Denied",
            Permission::ShouldAsk => "ShouldAsk",
        };
        f.write_str(name)
    }
}

/// Which button the permission dialog offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// Ask the platform for permission again.
    Request,
    /// The user has to grant access from the system settings.
    OpenSettings,
}

/// Content of the permission dialog for a non-granted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionPrompt {
    pub message: String,
    pub affordance: Affordance,
}

impl PermissionPrompt {
    /// Returns the prompt to display, or `None` when the dialog should close.
    pub fn for_permission(permission: Permission) -> Option<Self> {
        let affordance = match permission {
            Permission::Granted => return None,
            Permission::Denied => Affordance::OpenSettings,
            Permission::ShouldAsk => Affordance::Request,
        };

        Some(Self {
            message: format!("Files read permission: {}", permission),
            affordance,
        })
    }
}
