use chrono::Utc;
use log::{debug, info};

use crate::{
    auth,
    error::ApiError,
    model::{
        user::{LoginRequest, PublicUser, RegisterRequest},
        AppState, User,
    },
};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug)]
pub struct AuthOutcome {
    pub user: PublicUser,
    pub token: String,
}

pub async fn register(state: &AppState, request: RegisterRequest) -> Result<AuthOutcome, ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Name is required".to_owned()));
    }

    // Emails are compared and stored lowercased.
    let email = request.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::Validation(
            "Please enter a valid email".to_owned(),
        ));
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let password = auth::hash::hash_password(&request.password)?;

    let database = state.database.lock().await;

    if database.get_user_by_email(&email)?.is_some() {
        debug!("Registration rejected, email already taken: {email}");
        return Err(ApiError::Conflict("User already exists".to_owned()));
    }

    let user = User {
        id: state.next_snowflake()?,
        name: name.to_owned(),
        email,
        password,
        created_at: Utc::now(),
    };
    database.add_user(&user)?;
    drop(database);

    info!("User registered: {}", user.id);

    let token = auth::token::issue(&user.id, &state.config.jwt_secret)?;

    Ok(AuthOutcome {
        user: user.into(),
        token,
    })
}

pub async fn login(state: &AppState, request: LoginRequest) -> Result<AuthOutcome, ApiError> {
    let email = request.email.trim().to_lowercase();
    debug!("Got login request for {email}");

    let database = state.database.lock().await;
    let Some(user) = database.get_user_by_email(&email)? else {
        debug!("User not found: {email}");
        return Err(ApiError::NotFound("User doesn't exist".to_owned()));
    };
    drop(database);

    // Check password
    if !auth::hash::check_password(&request.password, &user.password) {
        debug!("Password incorrect for user: {}", user.id);
        return Err(ApiError::Auth("Invalid password".to_owned()));
    }

    let token = auth::token::issue(&user.id, &state.config.jwt_secret)?;

    Ok(AuthOutcome {
        user: user.into(),
        token,
    })
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn state() -> AppState {
        let config = Config {
            port: 0,
            database_path: ":memory:".to_owned(),
            jwt_secret: "test-secret".to_owned(),
            require_auth: false,
        };
        AppState::new(config).expect("in-memory state builds")
    }

    fn registration(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[tokio::test]
    async fn register_then_login_returns_the_same_user() {
        let state = state();

        let registered = register(&state, registration("Alice", "alice@x.com", "secret1"))
            .await
            .expect("registration succeeds");
        assert_eq!(registered.user.name, "Alice");

        let logged_in = login(
            &state,
            LoginRequest {
                email: "alice@x.com".to_owned(),
                password: "secret1".to_owned(),
            },
        )
        .await
        .expect("login succeeds");
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn token_decodes_to_the_registered_user_id() {
        let state = state();

        let outcome = register(&state, registration("Alice", "alice@x.com", "secret1"))
            .await
            .expect("registration succeeds");

        let claims = auth::token::verify(&outcome.token, &state.config.jwt_secret)
            .expect("token verifies");
        assert_eq!(claims.sub, outcome.user.id.to_string());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let state = state();

        register(&state, registration("Alice", "alice@x.com", "secret1"))
            .await
            .expect("first registration succeeds");

        let err = register(&state, registration("Alice 2", "Alice@X.com", "secret2"))
            .await
            .expect_err("second registration fails");
        assert!(matches!(err, ApiError::Conflict(_)));

        // First user still logs in fine.
        login(
            &state,
            LoginRequest {
                email: "alice@x.com".to_owned(),
                password: "secret1".to_owned(),
            },
        )
        .await
        .expect("original user unaffected");
    }

    #[tokio::test]
    async fn password_length_boundary() {
        let state = state();

        let err = register(&state, registration("Alice", "alice@x.com", "12345"))
            .await
            .expect_err("5 chars is too short");
        assert!(matches!(err, ApiError::Validation(_)));

        register(&state, registration("Alice", "alice@x.com", "123456"))
            .await
            .expect("6 chars is enough");
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let state = state();

        for email in ["", "no-at-sign", "@x.com", "alice@", "alice@nodot", "a b@x.com"] {
            let err = register(&state, registration("Alice", email, "secret1"))
                .await
                .expect_err("bad email rejected");
            assert!(matches!(err, ApiError::Validation(_)), "email: {email:?}");
        }
    }

    #[tokio::test]
    async fn missing_name_is_rejected() {
        let state = state();

        let err = register(&state, registration("  ", "alice@x.com", "secret1"))
            .await
            .expect_err("blank name rejected");
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn wrong_password_is_an_auth_error() {
        let state = state();

        register(&state, registration("Alice", "alice@x.com", "secret1"))
            .await
            .expect("registration succeeds");

        let err = login(
            &state,
            LoginRequest {
                email: "alice@x.com".to_owned(),
                password: "wrong-password".to_owned(),
            },
        )
        .await
        .expect_err("wrong password fails");
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let state = state();

        let err = login(
            &state,
            LoginRequest {
                email: "nobody@x.com".to_owned(),
                password: "secret1".to_owned(),
            },
        )
        .await
        .expect_err("unknown email fails");
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
