//! Role-based route decisions.
//!
//! The routing surface itself (views, layout) is out of scope; this module
//! only answers "given who you are and where you are, where should you be?"
//! so every shell makes the same redirect decisions.

use crate::roles::Role;

/// Paths reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &[
    "/login",
    "/forgot-password",
    "/reset-password",
    "/default-page",
];

/// Paths that require a session and are owned by a single role's dashboard
/// guard (plus the shared account pages).
pub const PROTECTED_PATHS: &[&str] = &[
    "/admin-dashboard",
    "/supervisor-dashboard",
    "/staff-dashboard",
    "/customer-dashboard",
    "/customer-incidents",
    "/customer-playbacks",
    "/change-password",
    "/profile",
];

/// Outcome of a route decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// The current path is fine for this visitor.
    Stay,
    /// Navigate to the given path instead.
    Redirect(&'static str),
}

/// Decide where a visitor at `path` belongs.
///
/// - No role (unauthenticated, or an unparseable role string): public paths
///   stay, everything else redirects to `/login`.
/// - Authenticated on a public path: redirect to the role's own dashboard.
/// - Authenticated on a protected path that is not the role's dashboard:
///   redirect to the role's own dashboard.
/// - Otherwise stay.
pub fn route_decision(role: Option<Role>, path: &str) -> RouteAction {
    let Some(role) = role else {
        if PUBLIC_PATHS.contains(&path) {
            return RouteAction::Stay;
        }
        return RouteAction::Redirect("/login");
    };

    let dashboard = role.dashboard_path();
    if PUBLIC_PATHS.contains(&path) {
        return RouteAction::Redirect(dashboard);
    }
    if PROTECTED_PATHS.contains(&path) && path != dashboard {
        return RouteAction::Redirect(dashboard);
    }
    RouteAction::Stay
}
