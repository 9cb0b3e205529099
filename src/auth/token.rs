use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::model::user;

/// Tokens stay valid for 30 days; clients log in again after that. There is
/// no revocation list and no refresh.
const VALIDITY_SECS: i64 = 60 * 60 * 24 * 30;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue(user_id: &user::Id, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat,
        exp: iat + VALIDITY_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Snowflake;

    const SECRET: &str = "test-secret";

    fn user_id() -> Snowflake {
        Snowflake::try_from(4302655488_i64).expect("valid snowflake")
    }

    #[test]
    fn issued_token_verifies_and_carries_the_user_id() {
        let id = user_id();
        let token = issue(&id, SECRET).expect("token issues");

        let claims = verify(&token, SECRET).expect("token verifies");
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.exp - claims.iat, VALIDITY_SECS);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue(&user_id(), SECRET).expect("token issues");
        assert!(verify(&token, "other-secret").is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue(&user_id(), SECRET).expect("token issues");
        let tampered = format!("{}x", token);
        assert!(verify(&tampered, SECRET).is_err());
    }
}
