use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for member accounts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Elevated capabilities an operator account may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    BypassPlanLimits,
    ManageCatalog,
    ResetProgress,
}

/// Resolved identity passed explicitly into every gated call.
///
/// Authentication happens upstream; this value is the already-verified answer,
/// so no resolver ever consults ambient session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: UserId,
    pub is_admin: bool,
    pub permissions: BTreeSet<Permission>,
}

impl RequestContext {
    /// Context for a regular member with no elevated capabilities.
    pub fn member(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: false,
            permissions: BTreeSet::new(),
        }
    }

    /// Context for an operator holding the full permission set.
    pub fn admin(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: true,
            permissions: BTreeSet::from([
                Permission::BypassPlanLimits,
                Permission::ManageCatalog,
                Permission::ResetProgress,
            ]),
        }
    }

    /// True when plan-derived limits are superseded for this caller.
    pub fn overrides_plan(&self) -> bool {
        self.is_admin && self.permissions.contains(&Permission::BypassPlanLimits)
    }
}

/// Boundary to the upstream authentication collaborator.
pub trait IdentityProvider: Send + Sync {
    fn context_for(&self, user_id: &UserId) -> RequestContext;
}
