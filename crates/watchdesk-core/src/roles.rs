//! User roles and their canonical dashboard paths.
//!
//! The backend transports roles as `ROLE_*` strings. Routing works on the
//! tagged [`Role`] enum instead of string switches, with one lookup table
//! mapping each role to its dashboard.

use std::fmt;

/// Back-office user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Supervisor,
    Staff,
    Customer,
}

/// Role → canonical dashboard path.
const DASHBOARDS: &[(Role, &str)] = &[
    (Role::Admin, "/admin-dashboard"),
    (Role::Supervisor, "/supervisor-dashboard"),
    (Role::Staff, "/staff-dashboard"),
    (Role::Customer, "/customer-dashboard"),
];

impl Role {
    /// Parse a wire role string, case-insensitively, with or without the
    /// `ROLE_` prefix. Returns `None` for unknown roles.
    pub fn parse(s: &str) -> Option<Role> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized.strip_prefix("role_").unwrap_or(&normalized);
        match name {
            "admin" => Some(Role::Admin),
            "supervisor" => Some(Role::Supervisor),
            "staff" => Some(Role::Staff),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }

    /// Wire representation (`ROLE_ADMIN` etc.).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::Supervisor => "ROLE_SUPERVISOR",
            Role::Staff => "ROLE_STAFF",
            Role::Customer => "ROLE_CUSTOMER",
        }
    }

    /// The single dashboard path this role lands on after login.
    pub fn dashboard_path(&self) -> &'static str {
        DASHBOARDS
            .iter()
            .find(|(role, _)| role == self)
            .map(|(_, path)| *path)
            .unwrap_or("/login")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
