//! Salted SHA-256 password scheme adapter.
//!
//! Digest format: `<salt-hex>$<sha256(salt || password)-hex>`. The salt is
//! sixteen random bytes per digest.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::ports::{PasswordScheme, PasswordSchemeError};

const SALT_LEN: usize = 16;

/// Salted SHA-256 implementation of the [`PasswordScheme`] port.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256PasswordScheme;

fn hash_with_salt(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

impl PasswordScheme for Sha256PasswordScheme {
    fn digest(&self, password: &str) -> String {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        format!("{}${}", hex::encode(salt), hash_with_salt(&salt, password))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordSchemeError> {
        let (salt_hex, expected) = digest
            .split_once('$')
            .ok_or_else(|| PasswordSchemeError::malformed_digest("missing salt separator"))?;
        let salt = hex::decode(salt_hex)
            .map_err(|err| PasswordSchemeError::malformed_digest(err.to_string()))?;
        Ok(hash_with_salt(&salt, password) == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn digest_then_verify_round_trips() {
        let scheme = Sha256PasswordScheme;
        let digest = scheme.digest("s3cret-pw");
        assert!(scheme.verify("s3cret-pw", &digest).expect("well-formed digest"));
        assert!(!scheme.verify("wrong", &digest).expect("well-formed digest"));
    }

    #[rstest]
    fn digests_are_salted() {
        let scheme = Sha256PasswordScheme;
        assert_ne!(scheme.digest("same"), scheme.digest("same"));
    }

    #[rstest]
    fn malformed_digests_are_rejected() {
        let scheme = Sha256PasswordScheme;
        let error = scheme.verify("pw", "no-separator").expect_err("malformed");
        assert!(matches!(error, PasswordSchemeError::MalformedDigest { .. }));
    }
}
