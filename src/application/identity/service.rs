//! User management service, application-layer orchestration

use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use tracing::{debug, info};

use crate::domain::{CreateUserDto, DomainError, DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::validations::{is_blank, is_valid_email, MIN_PASSWORD_LEN};

/// Signup payload as received; every field is optional until validated.
#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub membership_status: Option<String>,
}

/// Authentication result returned after a successful signup or login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

/// User service: orchestrates all identity use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
    /// Compared against when the email is unknown so both login failures cost one bcrypt verify
    dummy_hash: String,
}

impl UserService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        bcrypt_cost: u32,
    ) -> DomainResult<Self> {
        let dummy_hash = hash_password("timing-equalizer", bcrypt_cost)?;
        Ok(Self {
            repos,
            jwt_config,
            bcrypt_cost,
            dummy_hash,
        })
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user and issue a token for it.
    pub async fn signup(&self, input: SignupInput) -> DomainResult<AuthResult> {
        let (Some(email), Some(password)) = (present(input.email), present(input.password)) else {
            return Err(DomainError::Validation("Email and password are required".into()));
        };

        let (Some(name), Some(phone_number), Some(gender), Some(date_of_birth), Some(membership_status)) = (
            present(input.name),
            present(input.phone_number),
            present(input.gender),
            present(input.date_of_birth),
            present(input.membership_status),
        ) else {
            return Err(DomainError::Validation("Please add all required fields".into()));
        };

        if !is_valid_email(&email) {
            return Err(DomainError::Validation("Invalid email format".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }
        let date_of_birth = parse_date_of_birth(&date_of_birth)?;

        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("User already exists".into()));
        }

        let cost = self.bcrypt_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

        // A concurrent signup for the same email still surfaces as Conflict here.
        let user = self
            .repos
            .users()
            .create(CreateUserDto {
                name,
                email,
                password_hash,
                phone_number,
                gender,
                date_of_birth,
                membership_status,
            })
            .await?;

        let token = create_token(&user.id, &self.jwt_config)?;

        metrics::counter!("users_signed_up_total").increment(1);
        info!(user_id = %user.id, email = %user.email, "New user registered");

        Ok(AuthResult { token, user })
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> DomainResult<AuthResult> {
        let (Some(email), Some(password)) = (present(email), present(password)) else {
            return Err(DomainError::Validation("Email and password are required".into()));
        };

        let user = self.repos.users().find_by_email(&email).await?;
        let hash = user
            .as_ref()
            .map_or_else(|| self.dummy_hash.clone(), |u| u.password_hash.clone());

        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;

        let user = match user {
            Some(user) if matches => user,
            _ => {
                metrics::counter!("logins_total", "outcome" => "failure").increment(1);
                debug!(email = %email, "Login rejected");
                return Err(DomainError::Unauthorized("Invalid credentials".into()));
            }
        };

        let token = create_token(&user.id, &self.jwt_config)?;

        metrics::counter!("logins_total", "outcome" => "success").increment(1);
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResult { token, user })
    }

    /// Resolve a bearer token to the user it was issued for.
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let claims = verify_token(token, &self.jwt_config).map_err(|e| {
            debug!(error = %e, "Token verification failed");
            DomainError::Unauthorized("Request is not authorized".into())
        })?;

        self.repos
            .users()
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Request is not authorized".into()))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user(&self, id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }
}

/// `None` for missing or empty strings, mirroring a falsy check on the request body.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_blank(Some(v.as_str())))
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date_of_birth(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| DomainError::Validation("Invalid date_of_birth".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> UserService {
        UserService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            JwtConfig::default(),
            4,
        )
        .unwrap()
    }

    fn signup_input(email: &str, password: &str) -> SignupInput {
        SignupInput {
            name: Some("John Doe".into()),
            email: Some(email.into()),
            password: Some(password.into()),
            phone_number: Some("1234567890".into()),
            gender: Some("Male".into()),
            date_of_birth: Some("1990-01-01".into()),
            membership_status: Some("Active".into()),
        }
    }

    fn validation_message(err: DomainError) -> String {
        match err {
            DomainError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn signup_issues_token_for_new_user() {
        let svc = service();
        let result = svc.signup(signup_input("john@example.com", "secret1")).await.unwrap();

        assert_eq!(result.user.email, "john@example.com");
        assert_ne!(result.user.password_hash, "secret1");
        assert_eq!(result.token.split('.').count(), 3);

        let claims = verify_token(&result.token, svc.jwt_config()).unwrap();
        assert_eq!(claims.sub, result.user.id);
    }

    #[tokio::test]
    async fn signup_validation_order() {
        let svc = service();

        let mut input = signup_input("john@example.com", "secret1");
        input.email = None;
        input.name = None;
        let msg = validation_message(svc.signup(input).await.unwrap_err());
        assert_eq!(msg, "Email and password are required");

        let mut input = signup_input("not-an-email", "x");
        input.gender = Some(String::new());
        let msg = validation_message(svc.signup(input).await.unwrap_err());
        assert_eq!(msg, "Please add all required fields");

        let msg = validation_message(
            svc.signup(signup_input("not-an-email", "x")).await.unwrap_err(),
        );
        assert_eq!(msg, "Invalid email format");

        let msg = validation_message(
            svc.signup(signup_input("john@example.com", "12345")).await.unwrap_err(),
        );
        assert_eq!(msg, "Password must be at least 6 characters");

        let mut input = signup_input("john@example.com", "secret1");
        input.date_of_birth = Some("01/01/1990".into());
        let msg = validation_message(svc.signup(input).await.unwrap_err());
        assert_eq!(msg, "Invalid date_of_birth");
    }

    #[tokio::test]
    async fn signup_accepts_rfc3339_birth_date() {
        let svc = service();
        let mut input = signup_input("john@example.com", "secret1");
        input.date_of_birth = Some("1990-01-01T00:00:00Z".into());

        let result = svc.signup(input).await.unwrap();
        assert_eq!(
            result.user.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn duplicate_signup_is_a_conflict() {
        let svc = service();
        svc.signup(signup_input("john@example.com", "secret1")).await.unwrap();

        let err = svc
            .signup(signup_input("john@example.com", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m == "User already exists"));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let svc = service();
        svc.signup(signup_input("john@example.com", "secret1")).await.unwrap();

        let wrong_password = svc
            .login(Some("john@example.com".into()), Some("wrong-pass".into()))
            .await
            .unwrap_err();
        let unknown_email = svc
            .login(Some("nobody@example.com".into()), Some("secret1".into()))
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), "Invalid credentials");
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let svc = service();
        let msg = validation_message(
            svc.login(Some("john@example.com".into()), None).await.unwrap_err(),
        );
        assert_eq!(msg, "Email and password are required");
    }

    #[tokio::test]
    async fn authenticate_resolves_token_to_user() {
        let svc = service();
        let signed_up = svc.signup(signup_input("john@example.com", "secret1")).await.unwrap();
        let logged_in = svc
            .login(Some("john@example.com".into()), Some("secret1".into()))
            .await
            .unwrap();

        let user = svc.authenticate(&logged_in.token).await.unwrap();
        assert_eq!(user.id, signed_up.user.id);

        assert!(matches!(
            svc.authenticate("invalid-token").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn get_user_by_id() {
        let svc = service();
        let signed_up = svc.signup(signup_input("john@example.com", "secret1")).await.unwrap();

        let user = svc.get_user(&signed_up.user.id).await.unwrap();
        assert_eq!(user.email, "john@example.com");
        assert!(matches!(
            svc.get_user("65f1c2a9e4b0a1b2c3d4e5f6").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn token_for_missing_user_is_rejected() {
        let svc = service();
        let token = create_token("65f1c2a9e4b0a1b2c3d4e5f6", svc.jwt_config()).unwrap();

        assert!(matches!(
            svc.authenticate(&token).await,
            Err(DomainError::Unauthorized(_))
        ));
    }
}
