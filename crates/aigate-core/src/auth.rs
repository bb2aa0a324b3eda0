use aigate_protocol::client::auth::{AuthSession, AuthUser, PasswordResetAck};
use async_trait::async_trait;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

/// Authentication port. The gateway treats auth as an external collaborator
/// with a trivial contract; a real backend is supplied by the deployment,
/// and [`DemoAuth`] covers development and tests.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn register(&self, email: String, full_name: Option<String>) -> AuthSession;

    async fn login(&self, email: String) -> AuthSession;

    async fn reset_password(&self, email: String) -> PasswordResetAck;
}

/// Issues demo users and tokens without any backing store.
#[derive(Default)]
pub struct DemoAuth;

impl DemoAuth {
    pub fn new() -> Self {
        Self
    }

    fn token() -> String {
        format!("demo-jwt-token-{}", Uuid::new_v4().simple())
    }
}

#[async_trait]
impl AuthBackend for DemoAuth {
    async fn register(&self, email: String, full_name: Option<String>) -> AuthSession {
        AuthSession {
            user: AuthUser {
                id: format!("demo-user-{}", Uuid::new_v4().simple()),
                email,
                full_name,
                created: OffsetDateTime::now_utc().format(&Rfc3339).ok(),
            },
            token: Self::token(),
        }
    }

    async fn login(&self, email: String) -> AuthSession {
        AuthSession {
            user: AuthUser {
                id: "demo-user-123".to_string(),
                email,
                full_name: Some("Demo User".to_string()),
                created: None,
            },
            token: Self::token(),
        }
    }

    async fn reset_password(&self, email: String) -> PasswordResetAck {
        PasswordResetAck {
            message: "Password reset email sent successfully".to_string(),
            email,
        }
    }
}
