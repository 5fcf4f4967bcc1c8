use super::*;
use std::env;

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_AUTH_SECRET", "supersecretjwtsecretforunittesting123");
        env::set_var("AUTH_TOKEN_TTL_SECONDS", "3600");
    }
}

#[test]
fn test_validate_access_token_success() {
    set_env_vars();
    let secret = "supersecretjwtsecretforunittesting123";
    let my_claims = AuthClaims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        email: Some("test@example.com".to_string()),
        iat: 0,
        exp: 9999999999, // far future
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    let claims = validate_access_token(&token).expect("Valid token should pass");
    assert_eq!(claims.sub, my_claims.sub);
    assert_eq!(claims.email, my_claims.email);
}

#[test]
fn test_validate_access_token_expired() {
    set_env_vars();
    let secret = "supersecretjwtsecretforunittesting123";
    let my_claims = AuthClaims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        email: Some("test@example.com".to_string()),
        iat: 0,
        exp: 1, // past
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    let result = validate_access_token(&token);
    assert!(result.is_err());
}

#[test]
fn test_validate_access_token_invalid_signature() {
    set_env_vars();
    let secret = "wrongsecret";
    let my_claims = AuthClaims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        email: Some("test@example.com".to_string()),
        iat: 0,
        exp: 9999999999,
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    let result = validate_access_token(&token);
    assert!(result.is_err());
}

#[test]
fn test_issue_and_validate_round_trip() {
    set_env_vars();
    let user_id = Uuid::new_v4();

    let (token, expires_in) =
        issue_access_token(user_id, Some("seeker@example.com".to_string())).unwrap();
    assert_eq!(expires_in, 3600);

    let claims = validate_access_token(&token).expect("Freshly issued token should pass");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, Some("seeker@example.com".to_string()));
}
