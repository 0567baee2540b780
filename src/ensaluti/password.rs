//! Argon2id password hashing.
//!
//! Passwords arrive as [`SecretString`] and leave as PHC strings; the raw
//! text is never stored or logged.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};

/// Hash a submitted password with a fresh random salt.
pub fn hash(password: &SecretString) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)?
        .to_string())
}

/// Check a submitted password against a stored PHC string. An unparsable
/// stored hash counts as a mismatch.
#[must_use]
pub fn verify(password: &SecretString, stored: &str) -> bool {
    PasswordHash::new(stored).map_or(false, |parsed| {
        Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let password = SecretString::from("p1");
        let stored = hash(&password).unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(verify(&password, &stored));
    }

    #[test]
    fn test_wrong_password_fails() {
        let stored = hash(&SecretString::from("p1")).unwrap();

        assert!(!verify(&SecretString::from("wrong"), &stored));
    }

    #[test]
    fn test_salts_are_unique() {
        let password = SecretString::from("p1");

        assert_ne!(hash(&password).unwrap(), hash(&password).unwrap());
    }

    #[test]
    fn test_garbage_stored_hash_is_a_mismatch() {
        assert!(!verify(&SecretString::from("p1"), "not-a-phc-string"));
    }
}
