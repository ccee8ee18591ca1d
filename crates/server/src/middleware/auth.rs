//! Authenticated-subject extraction and capability checks.
//!
//! Identity is an external collaborator: the authentication gateway validates
//! the client's token and forwards the subject claim and role set as trusted
//! headers. This service never parses or validates tokens - it only consumes
//! the opaque subject and asks the access policy a yes/no question before
//! each mutating operation.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use barback_core::SubjectId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the validated subject claim.
pub const SUBJECT_HEADER: &str = "x-auth-subject";
/// Header carrying the comma-separated role set.
pub const ROLES_HEADER: &str = "x-auth-roles";

/// The authenticated actor behind a request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Opaque user identifier (the identity provider's subject claim).
    pub subject: SubjectId,
    /// Roles granted by the identity provider.
    pub roles: Vec<String>,
}

impl AuthUser {
    /// Parse an actor from gateway-forwarded headers.
    ///
    /// Returns `None` when no non-empty subject header is present.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let subject = headers
            .get(SUBJECT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())?;

        let roles = headers
            .get(ROLES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(parse_roles)
            .unwrap_or_default();

        Some(Self {
            subject: SubjectId::new(subject),
            roles,
        })
    }
}

fn parse_roles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("missing authenticated subject".to_string()))
    }
}

/// A capability required for a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, update, or delete cocktails and ingredients.
    ManageCatalog,
    /// Maintain a personal favorites list.
    UseFavorites,
}

/// External yes/no authorization decision gating mutating operations.
pub trait AccessPolicy: Send + Sync {
    /// Whether the actor holds the capability.
    fn allows(&self, actor: &AuthUser, capability: Capability) -> bool;
}

/// Role-based policy: catalog management requires a configured admin role,
/// favorites only require an authenticated subject.
#[derive(Debug, Clone)]
pub struct RolePolicy {
    admin_role: String,
}

impl RolePolicy {
    /// Create a policy with the role name that grants catalog management.
    #[must_use]
    pub fn new(admin_role: impl Into<String>) -> Self {
        Self {
            admin_role: admin_role.into().to_lowercase(),
        }
    }
}

impl AccessPolicy for RolePolicy {
    fn allows(&self, actor: &AuthUser, capability: Capability) -> bool {
        match capability {
            Capability::ManageCatalog => actor.roles.iter().any(|r| r == &self.admin_role),
            Capability::UseFavorites => true,
        }
    }
}

/// Check a capability against the application's access policy.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the policy denies the capability.
pub fn require(
    state: &AppState,
    actor: &AuthUser,
    capability: Capability,
) -> Result<(), AppError> {
    if state.policy().allows(actor, capability) {
        Ok(())
    } else {
        tracing::warn!(subject = %actor.subject, ?capability, "capability denied");
        Err(AppError::Forbidden(format!(
            "missing capability: {capability:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(subject: Option<&str>, roles: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(subject) = subject {
            map.insert(SUBJECT_HEADER, HeaderValue::from_str(subject).expect("header"));
        }
        if let Some(roles) = roles {
            map.insert(ROLES_HEADER, HeaderValue::from_str(roles).expect("header"));
        }
        map
    }

    #[test]
    fn test_missing_subject_is_anonymous() {
        assert!(AuthUser::from_headers(&headers(None, Some("admin"))).is_none());
        assert!(AuthUser::from_headers(&headers(Some("   "), None)).is_none());
    }

    #[test]
    fn test_roles_parsed_and_lowercased() {
        let user = AuthUser::from_headers(&headers(Some("kc-1"), Some("Admin, editor ,")))
            .expect("authenticated");
        assert_eq!(user.subject.as_str(), "kc-1");
        assert_eq!(user.roles, vec!["admin".to_string(), "editor".to_string()]);
    }

    #[test]
    fn test_role_policy_gates_catalog_management() {
        let policy = RolePolicy::new("Admin");
        let admin = AuthUser {
            subject: SubjectId::new("a"),
            roles: vec!["admin".to_string()],
        };
        let visitor = AuthUser {
            subject: SubjectId::new("b"),
            roles: vec![],
        };

        assert!(policy.allows(&admin, Capability::ManageCatalog));
        assert!(!policy.allows(&visitor, Capability::ManageCatalog));
        // Any authenticated subject may use favorites.
        assert!(policy.allows(&visitor, Capability::UseFavorites));
    }
}
