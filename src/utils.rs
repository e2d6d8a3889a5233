//! Hashing, hex validation and u32 limb encoding.

use crate::error::{FixtureError, Result};
use crate::types::{Digest, HASH_SIZE};
use sha2::{Digest as _, Sha256};

/// Number of u32 limbs a digest is split into.
pub const LIMB_COUNT: usize = HASH_SIZE / 4;

fn is_valid_hex_string(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_hexdigit())
}

fn strip_hex_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

/// Validates and strips hex prefix from a string.
///
/// # Errors
/// Returns [`FixtureError::Encoding`] if the stripped string does not have
/// `expected_len` characters or contains non-hex characters.
///
/// # Examples
///
/// ```
/// use zkp_commitment_fixtures::utils::validate_and_strip_hex;
///
/// let result = validate_and_strip_hex("0x1234abcd", 8).unwrap();
/// assert_eq!(result, "1234abcd");
/// ```
pub fn validate_and_strip_hex(input: &str, expected_len: usize) -> Result<String> {
    let stripped = strip_hex_prefix(input);

    if stripped.len() != expected_len {
        return Err(FixtureError::encoding(format!(
            "invalid hex string: must be {} characters (got {})",
            expected_len,
            stripped.len()
        )));
    }

    if !is_valid_hex_string(stripped) {
        return Err(FixtureError::encoding(
            "invalid hex string: contains non-hex characters",
        ));
    }

    Ok(stripped.to_string())
}

/// Parses a 64-character hex digest, with or without a `0x` prefix.
pub fn digest_from_hex(input: &str) -> Result<Digest> {
    let stripped = validate_and_strip_hex(input, HASH_SIZE * 2)?;
    let mut digest = [0u8; HASH_SIZE];
    hex::decode_to_slice(&stripped, &mut digest)
        .map_err(|e| FixtureError::encoding(format!("invalid digest hex: {e}")))?;
    Ok(digest)
}

/// SHA-256 of `data`.
#[inline]
#[must_use]
pub fn sha256(data: &[u8]) -> Digest {
    Sha256::digest(data).into()
}

/// Hash of two sibling nodes, `sha256(left || right)`.
#[inline]
#[must_use]
pub fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Splits a digest into eight big-endian u32 limbs.
///
/// This is the representation circuits take as public and private inputs:
/// limb `i` is bytes `4i..4i+4` read most-significant first.
///
/// ```
/// use zkp_commitment_fixtures::utils::encode_u32_limbs;
///
/// let mut digest = [0u8; 32];
/// digest[31] = 1;
/// assert_eq!(encode_u32_limbs(&digest), [0, 0, 0, 0, 0, 0, 0, 1]);
/// ```
#[must_use]
pub fn encode_u32_limbs(digest: &Digest) -> [u32; LIMB_COUNT] {
    let mut limbs = [0u32; LIMB_COUNT];
    for (limb, chunk) in limbs.iter_mut().zip(digest.chunks_exact(4)) {
        *limb = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    limbs
}

/// Renders limbs as space-separated decimals.
#[must_use]
pub fn limbs_to_string(limbs: &[u32; LIMB_COUNT]) -> String {
    limbs
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses the output of [`limbs_to_string`].
///
/// # Errors
/// Returns [`FixtureError::Encoding`] unless the input holds exactly eight
/// whitespace-separated u32 decimals.
pub fn parse_limbs(input: &str) -> Result<[u32; LIMB_COUNT]> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.len() != LIMB_COUNT {
        return Err(FixtureError::encoding(format!(
            "expected {LIMB_COUNT} limbs, got {}",
            tokens.len()
        )));
    }

    let mut limbs = [0u32; LIMB_COUNT];
    for (limb, token) in limbs.iter_mut().zip(tokens) {
        *limb = token
            .parse()
            .map_err(|e| FixtureError::encoding(format!("invalid limb '{token}': {e}")))?;
    }
    Ok(limbs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_and_strip_hex_valid() {
        let result = validate_and_strip_hex("0x1234abcd", 8);
        assert_eq!(result.unwrap(), "1234abcd");
    }

    #[test]
    fn test_validate_and_strip_hex_uppercase_prefix() {
        let result = validate_and_strip_hex("0X1234ABCD", 8);
        assert_eq!(result.unwrap(), "1234ABCD");
    }

    #[test]
    fn test_validate_and_strip_hex_with_whitespace() {
        let result = validate_and_strip_hex("  0x1234abcd  ", 8);
        assert_eq!(result.unwrap(), "1234abcd");
    }

    #[test]
    fn test_validate_and_strip_hex_wrong_length() {
        let result = validate_and_strip_hex("0x1234abcd", 10);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must be 10 characters"));
    }

    #[test]
    fn test_validate_and_strip_hex_invalid_characters() {
        let result = validate_and_strip_hex("0x1234xyzw", 8);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("non-hex characters"));
    }

    #[test]
    fn test_digest_from_hex() {
        let hex_str = format!("0x{}", "ab".repeat(32));
        assert_eq!(digest_from_hex(&hex_str).unwrap(), [0xabu8; 32]);
        assert!(digest_from_hex("abcd").is_err());
    }

    #[test]
    fn test_sha256_empty_input() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_pair_matches_concatenation() {
        let left = [1u8; 32];
        let right = [2u8; 32];
        let mut joined = Vec::with_capacity(64);
        joined.extend_from_slice(&left);
        joined.extend_from_slice(&right);
        assert_eq!(hash_pair(&left, &right), sha256(&joined));
        assert_ne!(hash_pair(&left, &right), hash_pair(&right, &left));
    }

    #[test]
    fn test_encode_zero_digest() {
        assert_eq!(encode_u32_limbs(&[0u8; 32]), [0u32; 8]);
    }

    #[test]
    fn test_encode_max_digest() {
        assert_eq!(encode_u32_limbs(&[0xffu8; 32]), [u32::MAX; 8]);
    }

    #[test]
    fn test_encode_is_big_endian() {
        let mut digest = [0u8; 32];
        digest[0..4].copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);
        digest[28..32].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let limbs = encode_u32_limbs(&digest);
        assert_eq!(limbs[0], 0x0102_0304);
        assert_eq!(limbs[7], 0xdead_beef);
    }

    #[test]
    fn test_limbs_string_round_trip() {
        let limbs = [0, 1, 2, 3, 4, 5, 6, u32::MAX];
        let text = limbs_to_string(&limbs);
        assert_eq!(text, "0 1 2 3 4 5 6 4294967295");
        assert_eq!(parse_limbs(&text).unwrap(), limbs);
    }

    #[test]
    fn test_parse_limbs_rejects_wrong_count_and_overflow() {
        assert!(parse_limbs("1 2 3").is_err());
        assert!(parse_limbs("0 0 0 0 0 0 0 4294967296").is_err());
    }
}
