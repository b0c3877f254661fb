use qms_backend::util::password::*;
use std::collections::HashSet;

#[test]
fn test_hash_password_success() {
    let password = "test_password_123";
    let hash = PasswordUtilsImpl::hash_password(password).expect("Failed to hash password");

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
    assert!(hash.starts_with("$argon2"));

    let parts: Vec<&str> = hash.split('$').collect();
    assert!(parts.len() >= 5, "Hash should have at least 5 parts separated by $");
}

#[test]
fn test_hash_is_salted() {
    let password = "same_password";
    let first = PasswordUtilsImpl::hash_password(password).unwrap();
    let second = PasswordUtilsImpl::hash_password(password).unwrap();
    assert_ne!(first, second, "Two hashes of the same password should differ");
}

#[test]
fn test_verify_password_success() {
    let password = "correct_horse_battery";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("wrong_password", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    assert!(PasswordUtilsImpl::verify_password("whatever", "not-a-hash").is_err());
}

#[test]
fn test_generate_random_password_length() {
    let password = PasswordUtilsImpl::generate_random_password(16);
    assert_eq!(password.len(), 16);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));

    // Below the minimum, the length is clamped up to 8
    let short = PasswordUtilsImpl::generate_random_password(3);
    assert_eq!(short.len(), 8);
}

#[test]
fn test_generate_random_password_unique() {
    let mut seen = HashSet::new();
    for _ in 0..50 {
        assert!(seen.insert(PasswordUtilsImpl::generate_random_password(12)));
    }
}
