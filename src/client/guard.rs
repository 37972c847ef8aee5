//! Route protection for the dashboard

use crate::{
    config::ClientConfig,
    models::{user::RolePolicy, Role, User},
};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Protected routes and the roles allowed on each; an empty list admits every role
const ROUTES: &[(&str, &[Role])] = &[
    ("/dashboard", &[]),
    ("/profile", &[Role::Tourist]),
    ("/emergency-contacts", &[Role::Tourist]),
    ("/awareness-guide", &[Role::Tourist]),
    ("/chatbot", &[Role::Tourist]),
    ("/settings", &[Role::Tourist]),
    ("/alerts", &[Role::Police]),
    ("/tourists", &[Role::Police]),
    ("/map", &[Role::Police]),
    ("/evidence", &[Role::Police]),
    ("/sop", &[Role::Police]),
    ("/registry", &[Role::Tourism]),
    ("/analytics", &[Role::Tourism]),
    ("/statistics", &[Role::Tourism]),
    ("/risk-alerts", &[Role::Tourism]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still restoring; show a spinner
    Loading,
    RedirectToLogin,
    Unauthorized,
    Allow,
}

impl GuardDecision {
    /// Where to navigate, if anywhere
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::Unauthorized => Some(UNAUTHORIZED_PATH),
            GuardDecision::Loading | GuardDecision::Allow => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RouteGuard {
    policy: RolePolicy,
}

impl RouteGuard {
    pub fn new(policy: RolePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(RolePolicy::from_enforce_flag(config.enforce_roles))
    }

    /// Roles allowed on a protected path, `None` for public or unknown paths
    pub fn allowed_roles(path: &str) -> Option<&'static [Role]> {
        ROUTES
            .iter()
            .find(|(route, _)| *route == path)
            .map(|(_, roles)| *roles)
    }

    pub fn check(&self, loading: bool, user: Option<&User>, allowed: &[Role]) -> GuardDecision {
        if loading {
            return GuardDecision::Loading;
        }
        let Some(user) = user else {
            return GuardDecision::RedirectToLogin;
        };
        if self.policy.permits(user.role, allowed) {
            if !RolePolicy::Enforce.permits(user.role, allowed) {
                tracing::debug!(role = %user.role, "route role restriction bypassed");
            }
            GuardDecision::Allow
        } else {
            GuardDecision::Unauthorized
        }
    }

    /// Decision for a path of the route table; unknown paths are public
    pub fn check_path(&self, path: &str, loading: bool, user: Option<&User>) -> GuardDecision {
        match Self::allowed_roles(path) {
            Some(allowed) => self.check(loading, user, allowed),
            None => GuardDecision::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "u".into(),
            email: "u@b.com".into(),
            name: "u".into(),
            role,
            profile_complete: true,
        }
    }

    #[test]
    fn test_guard_states() {
        let guard = RouteGuard::new(RolePolicy::Enforce);
        let police = user(Role::Police);

        assert_eq!(guard.check_path("/alerts", true, None), GuardDecision::Loading);
        assert_eq!(
            guard.check_path("/alerts", false, None).redirect(),
            Some(LOGIN_PATH)
        );
        assert_eq!(guard.check_path("/alerts", false, Some(&police)), GuardDecision::Allow);
        assert_eq!(
            guard.check_path("/registry", false, Some(&police)),
            GuardDecision::Unauthorized
        );
        assert_eq!(guard.check_path("/dashboard", false, Some(&police)), GuardDecision::Allow);
        assert_eq!(guard.check_path("/login", false, None), GuardDecision::Allow);
    }

    #[test]
    fn test_permissive_policy_admits_any_role() {
        let config = ClientConfig {
            enforce_roles: false,
            ..ClientConfig::default()
        };
        let guard = RouteGuard::from_config(&config);
        let tourist = user(Role::Tourist);
        assert_eq!(guard.check_path("/evidence", false, Some(&tourist)), GuardDecision::Allow);
        assert_eq!(
            guard.check_path("/evidence", false, None),
            GuardDecision::RedirectToLogin
        );
    }
}
