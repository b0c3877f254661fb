use qms_backend::config::JwtConfig;
use qms_backend::util::jwt::*;

// Helper function to create JWT utils for testing
fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::from_test_env().unwrap_or_else(|_| {
        let config = JwtConfig::default();
        JwtTokenUtilsImpl::new(config)
    })
}

struct TestUser {
    id: String,
    email: String,
    role: String,
}

impl TestUser {
    fn new_user() -> Self {
        Self {
            id: "user123".to_string(),
            email: "user@example.com".to_string(),
            role: "user".to_string(),
        }
    }

    fn new_admin() -> Self {
        Self {
            id: "admin456".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        }
    }
}

#[test]
fn test_jwt_utils_creation() {
    let jwt_utils = create_test_jwt_utils();
    assert!(!jwt_utils.jwt_config.jwt_secret.is_empty());
    assert!(jwt_utils.jwt_config.access_token_expiration > 0);
    assert!(jwt_utils.jwt_config.refresh_token_expiration > 0);
}

#[test]
fn test_token_type_as_str() {
    assert_eq!(TokenType::Access.as_str(), "access");
    assert_eq!(TokenType::Refresh.as_str(), "refresh");
}

#[test]
fn test_generate_access_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let token = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .expect("Failed to generate access token");
    assert!(!token.is_empty());

    let claims = jwt_utils
        .validate_access_token(&token)
        .expect("Failed to validate access token");
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, user.role);
    assert_eq!(claims.token_type, "access");
}

#[test]
fn test_generate_refresh_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_admin();

    let token = jwt_utils
        .generate_refresh_token(&user.id, &user.email, &user.role)
        .expect("Failed to generate refresh token");

    let claims = jwt_utils
        .validate_refresh_token(&token)
        .expect("Failed to validate refresh token");
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.role, user.role);
    assert_eq!(claims.token_type, "refresh");
}

#[test]
fn test_generate_token_pair_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let pair = jwt_utils
        .generate_token_pair(&user.id, &user.email, &user.role)
        .expect("Failed to generate token pair");
    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(pair.token_type, "Bearer");
    assert!(pair.expires_in > 0);
}

#[test]
fn test_access_token_rejected_as_refresh() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let access = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();
    assert!(jwt_utils.validate_refresh_token(&access).is_err());

    let refresh = jwt_utils
        .generate_refresh_token(&user.id, &user.email, &user.role)
        .unwrap();
    assert!(jwt_utils.validate_access_token(&refresh).is_err());
}

#[test]
fn test_validate_garbage_token_fails() {
    let jwt_utils = create_test_jwt_utils();
    assert!(jwt_utils.validate_access_token("not.a.token").is_err());
    assert!(jwt_utils.validate_access_token("").is_err());
}

#[test]
fn test_extract_token_from_header() {
    let jwt_utils = create_test_jwt_utils();

    let token = jwt_utils
        .extract_token_from_header("Bearer abc.def.ghi")
        .expect("Failed to extract token");
    assert_eq!(token, "abc.def.ghi");

    assert!(jwt_utils.extract_token_from_header("abc.def.ghi").is_err());
    assert!(jwt_utils.extract_token_from_header("Basic dXNlcg==").is_err());
    assert!(jwt_utils.extract_token_from_header("").is_err());
}
