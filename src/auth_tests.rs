#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::Error;

#[test]
fn test_hash_is_not_plaintext() {
    let hash = hash_password("pass1").unwrap();
    assert!(!hash.contains("pass1"));
    assert!(hash.starts_with("$argon2"));
}

#[test]
fn test_hash_is_salted() {
    let a = hash_password("pass1").unwrap();
    let b = hash_password("pass1").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_verify_roundtrip() {
    let hash = hash_password("pass1").unwrap();
    assert!(verify_password("pass1", &hash).unwrap());
    assert!(!verify_password("pass2", &hash).unwrap());
    assert!(!verify_password("", &hash).unwrap());
}

#[test]
fn test_verify_malformed_hash() {
    let err = verify_password("pass1", "not-a-hash").unwrap_err();
    assert!(matches!(err, Error::PasswordHash(_)));
}
