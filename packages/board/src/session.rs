//! Who is signed in, and whether they may see a portal.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::ResourceClient;
use crate::de;
use crate::error::AuthError;
use crate::gateway::Gateway;
use crate::models::{join_name, Role};

/// Answer of `GET /api/auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Me {
    #[serde(default, deserialize_with = "de::nullable")]
    pub role: Role,
    #[serde(alias = "id", deserialize_with = "de::id")]
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Me {
    /// Full name when known, otherwise the email, otherwise the id.
    pub fn display_name(&self) -> String {
        let name = join_name(&[self.first_name.as_deref(), self.last_name.as_deref()]);
        if !name.is_empty() {
            return name;
        }
        self.email.clone().unwrap_or_else(|| self.user_id.clone())
    }
}

/// Check the session and its role.
///
/// 401/403 become [`AuthError::Unauthenticated`]; a signed-in user with another
/// role gets [`AuthError::Forbidden`]. Callers redirect on any error.
pub async fn authorize<G: Gateway>(
    client: &ResourceClient<G>,
    required: Role,
) -> Result<Me, AuthError> {
    let me = client.me().await.map_err(|e| {
        if e.is_unauthorized() {
            AuthError::Unauthenticated
        } else {
            AuthError::Unreachable(e)
        }
    })?;
    if me.role != required {
        warn!(%required, actual = %me.role, "role mismatch");
        return Err(AuthError::Forbidden {
            required,
            actual: me.role,
        });
    }
    debug!(user_id = %me.user_id, role = %me.role, "session accepted");
    Ok(me)
}

/// Ask the backend to end the session. Failures are logged; the caller
/// navigates home regardless.
pub async fn logout<G: Gateway>(client: &ResourceClient<G>) {
    if let Err(e) = client.logout().await {
        warn!("logout request failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::gateway::Method;
    use crate::memory::MemoryGateway;
    use serde_json::json;

    #[tokio::test]
    async fn test_admin_accepted() {
        let gateway = MemoryGateway::new();
        gateway.respond(
            Method::Get,
            "/api/auth/me",
            json!({"role": "ADMIN", "user_id": 1, "email": "root@clinic.vn"}),
        );
        let client = ResourceClient::new(gateway);

        let me = authorize(&client, Role::Admin).await.unwrap();
        assert_eq!(me.user_id, "1");
        assert_eq!(me.display_name(), "root@clinic.vn");
    }

    #[tokio::test]
    async fn test_role_mismatch_is_forbidden() {
        let gateway = MemoryGateway::new();
        gateway.respond(
            Method::Get,
            "/api/auth/me",
            json!({"role": "CUSTOMER", "id": "c1"}),
        );
        let client = ResourceClient::new(gateway);

        let err = authorize(&client, Role::Admin).await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Forbidden {
                required: Role::Admin,
                actual: Role::Customer
            }
        );
    }

    #[tokio::test]
    async fn test_unauthorized_and_unreachable() {
        let gateway = MemoryGateway::new();
        gateway.fail(
            Method::Get,
            "/api/auth/me",
            FetchError::from_response(401, r#"{"detail": "Not authenticated"}"#),
        );
        let client = ResourceClient::new(gateway.clone());
        assert_eq!(
            authorize(&client, Role::Dentist).await.unwrap_err(),
            AuthError::Unauthenticated
        );

        gateway.fail(
            Method::Get,
            "/api/auth/me",
            FetchError::Network("offline".into()),
        );
        assert!(matches!(
            authorize(&client, Role::Dentist).await.unwrap_err(),
            AuthError::Unreachable(FetchError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_logout_failure_is_swallowed() {
        let gateway = MemoryGateway::new();
        let client = ResourceClient::new(gateway.clone());

        logout(&client).await;
        assert_eq!(gateway.calls()[0].path, "/api/auth/logout");
        assert_eq!(gateway.calls()[0].method, Method::Post);
    }
}
