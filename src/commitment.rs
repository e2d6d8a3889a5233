//! Commitment and nullifier hashing.
//!
//! Both digests hash 64 bytes: two fixed-width 32-byte big-endian integers.
//!
//! - `commitment = SHA-256(nullifier || secret)`
//! - `nullifier_hash = SHA-256(nullifier || 0^32)`
//!
//! The nullifier hash is published to prevent a commitment being spent twice,
//! so it must not depend on the secret.

use crate::error::Result;
use crate::types::{Digest, SecretValue, HASH_SIZE};
use crate::utils::sha256;
use num_bigint::BigUint;

fn hash_concat(first: &[u8; HASH_SIZE], second: &[u8; HASH_SIZE]) -> Digest {
    let mut preimage = [0u8; HASH_SIZE * 2];
    preimage[..HASH_SIZE].copy_from_slice(first);
    preimage[HASH_SIZE..].copy_from_slice(second);
    sha256(&preimage)
}

/// Commitment to a `(nullifier, secret)` pair. Nullifier bytes come first.
///
/// # Examples
///
/// ```
/// use zkp_commitment_fixtures::commitment::commit;
/// use zkp_commitment_fixtures::types::SecretValue;
///
/// let digest = commit(&SecretValue::from(1234545679u64), &SecretValue::from(987654321u64));
/// assert_eq!(
///     hex::encode(digest),
///     "beb66108a537fd6e1d82b9d9e1499183a8f68e1458c850509a4f09a5127ac539"
/// );
/// ```
#[must_use]
pub fn commit(nullifier: &SecretValue, secret: &SecretValue) -> Digest {
    hash_concat(nullifier.as_bytes(), secret.as_bytes())
}

/// Secret-independent tag derived from the nullifier alone.
#[must_use]
pub fn nullifier_hash(nullifier: &SecretValue) -> Digest {
    hash_concat(nullifier.as_bytes(), &[0u8; HASH_SIZE])
}

/// [`commit`] over unchecked integers.
///
/// # Errors
/// Returns [`crate::FixtureError::Encoding`] when either value needs more than 256 bits.
pub fn commit_values(nullifier: &BigUint, secret: &BigUint) -> Result<Digest> {
    let nullifier = SecretValue::from_biguint(nullifier)?;
    let secret = SecretValue::from_biguint(secret)?;
    Ok(commit(&nullifier, &secret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixtureError;

    const NULLIFIER: u64 = 1234545679;
    const SECRET: u64 = 987654321;

    #[test]
    fn test_commit_golden_value() {
        let digest = commit(&SecretValue::from(NULLIFIER), &SecretValue::from(SECRET));
        assert_eq!(
            hex::encode(digest),
            "beb66108a537fd6e1d82b9d9e1499183a8f68e1458c850509a4f09a5127ac539"
        );
    }

    #[test]
    fn test_nullifier_hash_golden_value() {
        let digest = nullifier_hash(&SecretValue::from(NULLIFIER));
        assert_eq!(
            hex::encode(digest),
            "37e1d8b1b12bda02aff9df55b8ab4f9f49765820ae85d6905467bc1b846630aa"
        );
    }

    #[test]
    fn test_commit_is_deterministic() {
        let n = SecretValue::from(11u64);
        let s = SecretValue::from(22u64);
        assert_eq!(commit(&n, &s), commit(&n, &s));
    }

    #[test]
    fn test_commit_order_matters() {
        let n = SecretValue::from(NULLIFIER);
        let s = SecretValue::from(SECRET);
        assert_ne!(commit(&n, &s), commit(&s, &n));
    }

    #[test]
    fn test_nullifier_hash_differs_from_commit() {
        let n = SecretValue::from(NULLIFIER);
        for secret in [1u64, SECRET, u64::MAX] {
            assert_ne!(nullifier_hash(&n), commit(&n, &SecretValue::from(secret)));
        }
    }

    #[test]
    fn test_nullifier_hash_is_commit_with_zero_secret() {
        // A zero secret encodes to the same 32 zero bytes used as padding.
        let n = SecretValue::from(NULLIFIER);
        assert_eq!(nullifier_hash(&n), commit(&n, &SecretValue::from(0u64)));
    }

    #[test]
    fn test_commit_values_rejects_oversized_input() {
        let too_big = BigUint::from(1u8) << 256usize;
        let err = commit_values(&too_big, &BigUint::from(1u8)).unwrap_err();
        assert!(matches!(err, FixtureError::Encoding(_)));
    }

    #[test]
    fn test_commit_values_matches_commit() {
        let digest = commit_values(&BigUint::from(NULLIFIER), &BigUint::from(SECRET)).unwrap();
        assert_eq!(
            digest,
            commit(&SecretValue::from(NULLIFIER), &SecretValue::from(SECRET))
        );
    }
}
