//! Authentication Flows
//!
//! Login, registration, and forgot-password. Each validates locally,
//! attempts the live backend, and fabricates an offline result only when
//! the backend is unreachable. A rejection (bad credentials, duplicate
//! account) propagates unchanged and never creates a session.

use crate::api::{LoginRequest, RegisterRequest};
use crate::mock;
use crate::session::{Role, Session};
use crate::validate::Validator;

use super::{AdvisoryClient, AdvisoryError, Fetched};

/// Login form input. `role` is the caller's selection on the login
/// dialog; the live backend ignores it, but an offline login fabricates
/// a user with exactly this role.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Registration form input. The single `name` field is split into first
/// and last names the way the registration dialog does.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub expertise: Option<String>,
    pub qualifications: Option<String>,
    pub phone_number: Option<String>,
    pub farm_size: Option<String>,
    pub primary_crops: Option<String>,
}

fn split_name(name: &str) -> (String, String) {
    let mut parts = name.trim().split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

impl AdvisoryClient {
    /// Sign in. Stores the session on success, live or offline.
    pub async fn login(&self, input: &LoginInput) -> Result<Fetched<Session>, AdvisoryError> {
        let mut checks = Validator::new();
        if checks.required("email", &input.email) {
            checks.email("email", &input.email);
        }
        if checks.required("password", &input.password) {
            checks.min_len("password", &input.password, 6);
        }
        checks.finish()?;

        let request = LoginRequest {
            username: input.email.clone(),
            password: input.password.clone(),
        };

        match self.api().login(&request).await {
            Ok(session) => {
                self.store().set(&session)?;
                Ok(Fetched::live(session))
            }
            Err(err) if err.is_degradable() => {
                tracing::info!("backend not available, using offline login");
                let session = mock::mock_session(&input.email, "Test", "User", input.role);
                self.store().set(&session)?;
                Ok(Fetched::mock(session))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Sign in to the admin console. A live login with any non-admin
    /// role is rejected without storing a session.
    pub async fn admin_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Fetched<Session>, AdvisoryError> {
        let mut checks = Validator::new();
        if checks.required("email", email) {
            checks.email("email", email);
        }
        if checks.required("password", password) {
            checks.min_len("password", password, 6);
        }
        checks.finish()?;

        let request = LoginRequest {
            username: email.to_string(),
            password: password.to_string(),
        };

        match self.api().login(&request).await {
            Ok(session) => {
                if session.user.role != Role::Admin {
                    return Err(AdvisoryError::AccessDenied);
                }
                self.store().set(&session)?;
                Ok(Fetched::live(session))
            }
            Err(err) if err.is_degradable() => {
                tracing::info!("backend not available, using offline admin login");
                let session = mock::mock_session(email, "Admin", "User", Role::Admin);
                self.store().set(&session)?;
                Ok(Fetched::mock(session))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Create an account. An offline registration consults the local
    /// ledger first so the same email cannot register twice while the
    /// backend is unreachable.
    pub async fn register(&self, input: &RegisterInput) -> Result<Fetched<Session>, AdvisoryError> {
        let mut checks = Validator::new();
        checks.required("name", &input.name);
        if checks.required("email", &input.email) {
            checks.email("email", &input.email);
        }
        if checks.required("password", &input.password) {
            checks.min_len("password", &input.password, 6);
        }
        checks.finish()?;

        let (first_name, last_name) = split_name(&input.name);

        let request = RegisterRequest {
            username: input.email.clone(),
            email: input.email.clone(),
            password: input.password.clone(),
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            role: input.role,
            expertise: (input.role == Role::Expert)
                .then(|| input.expertise.clone().unwrap_or_default()),
            qualifications: (input.role == Role::Expert)
                .then(|| input.qualifications.clone().unwrap_or_default()),
            phone_number: input.phone_number.clone(),
            farm_size: (input.role == Role::Farmer)
                .then(|| input.farm_size.clone())
                .flatten(),
            primary_crops: (input.role == Role::Farmer)
                .then(|| input.primary_crops.clone())
                .flatten(),
        };

        match self.api().register(&request).await {
            Ok(session) => {
                self.store().set(&session)?;
                Ok(Fetched::live(session))
            }
            Err(err) if err.is_degradable() => {
                tracing::info!("backend not available, using offline registration");
                if self.store().mock_emails().iter().any(|e| e == &input.email) {
                    return Err(AdvisoryError::DuplicateEmail);
                }
                let session = mock::mock_session(&input.email, &first_name, &last_name, input.role);
                self.store().set(&session)?;
                self.store().record_mock_email(&input.email)?;
                Ok(Fetched::mock(session))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Request a password reset. The acknowledgement is identical
    /// whether the backend accepted the request or was unreachable, so
    /// the flow never reveals whether an email is registered.
    pub async fn forgot_password(&self, email: &str) -> Result<Fetched<()>, AdvisoryError> {
        let mut checks = Validator::new();
        if checks.required("email", email) {
            checks.email("email", email);
        }
        checks.finish()?;

        match self.api().forgot_password(email).await {
            Ok(()) => Ok(Fetched::live(())),
            Err(err) => {
                tracing::debug!(%err, "forgot-password unavailable, acknowledging locally");
                Ok(Fetched::mock(()))
            }
        }
    }
}
