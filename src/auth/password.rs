use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hashes a plaintext password with a fresh random salt.
///
/// Returns `(salt, digest)`. The digest is a PHC string that embeds the same
/// salt along with the Argon2 parameters, so `verify_password` only needs the
/// digest; the salt is stored separately on the user row as well.
pub fn hash_password(plain: &str) -> anyhow::Result<(String, String)> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let digest = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok((salt.to_string(), digest))
}

/// Recomputes the digest for `plain` and compares against the stored one.
///
/// A mismatch is a normal `Ok(false)`; only a malformed stored digest is an
/// error. The comparison inside argon2 is constant-time.
pub fn verify_password(plain: &str, digest: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(digest).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let (_salt, digest) = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &digest).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let (_salt, digest) = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &digest).expect("verify should not error"));
    }

    #[test]
    fn salts_are_unique_per_hash() {
        let (salt_a, digest_a) = hash_password("same-password").unwrap();
        let (salt_b, digest_b) = hash_password("same-password").unwrap();
        assert_ne!(salt_a, salt_b);
        assert_ne!(digest_a, digest_b);
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
