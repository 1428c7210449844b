use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the signed-in user, as carried by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Administrator,
    #[serde(rename = "user")]
    RestrictedUser,
}

impl Role {
    pub fn capabilities(&self) -> CapabilitySet {
        match self {
            Role::Administrator => CapabilitySet(ADMINISTRATOR_CAPABILITIES),
            Role::RestrictedUser => CapabilitySet(RESTRICTED_USER_CAPABILITIES),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::RestrictedUser => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named permission that gates rendering of a control.
///
/// Advisory only: the TIN service enforces authorization on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Create,
    Update,
    Activate,
    Deactivate,
    Delete,
    ViewAllRecords,
    ViewOwnRecords,
}

const ADMINISTRATOR_CAPABILITIES: &[Capability] = &[
    Capability::Create,
    Capability::Update,
    Capability::Activate,
    Capability::Deactivate,
    Capability::Delete,
    Capability::ViewAllRecords,
];

const RESTRICTED_USER_CAPABILITIES: &[Capability] = &[
    Capability::Create,
    Capability::Update,
    Capability::ViewOwnRecords,
];

/// Fixed capability set bound to a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet(&'static [Capability]);

impl CapabilitySet {
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    /// Any of activate / deactivate / delete
    pub fn has_lifecycle_actions(&self) -> bool {
        self.contains(Capability::Activate)
            || self.contains(Capability::Deactivate)
            || self.contains(Capability::Delete)
    }
}

/// Identity handed to the console by the session provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub role: Role,
}
