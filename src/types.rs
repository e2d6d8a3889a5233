//! Type definitions for commitment fixtures.

use crate::error::{FixtureError, Result};
use crate::utils::{digest_from_hex, encode_u32_limbs, limbs_to_string, parse_limbs, LIMB_COUNT};
use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HASH_SIZE: usize = 32;

/// Output of the fixed 256-bit hash function.
pub type Digest = [u8; HASH_SIZE];

/// Root reported by a tree with no leaves.
///
/// This is a sentinel, not a hash: an all-zero value cannot be told apart
/// from a genuine digest that happens to be zero, so callers treat it as
/// "no data".
pub const ZERO_DIGEST: Digest = [0u8; HASH_SIZE];

/// A non-negative integer below `2^256`, held in its 32-byte big-endian form.
///
/// Nullifiers and secrets are both `SecretValue`s. Debug output is redacted.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecretValue([u8; HASH_SIZE]);

impl SecretValue {
    /// Wraps an already-encoded 32-byte big-endian value.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        SecretValue(bytes)
    }

    /// Encodes an arbitrary-precision unsigned integer.
    ///
    /// # Errors
    /// Returns [`FixtureError::Encoding`] when the value needs more than 256 bits.
    pub fn from_biguint(value: &BigUint) -> Result<Self> {
        let bytes = value.to_bytes_be();
        if bytes.len() > HASH_SIZE {
            return Err(FixtureError::encoding(format!(
                "value needs {} bytes, at most {HASH_SIZE} allowed",
                bytes.len()
            )));
        }
        let mut out = [0u8; HASH_SIZE];
        out[HASH_SIZE - bytes.len()..].copy_from_slice(&bytes);
        Ok(SecretValue(out))
    }

    /// Encodes a signed integer, rejecting negatives.
    pub fn from_bigint(value: &BigInt) -> Result<Self> {
        match value.to_biguint() {
            Some(unsigned) => Self::from_biguint(&unsigned),
            None => Err(FixtureError::encoding(format!(
                "value {value} is negative"
            ))),
        }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    #[must_use]
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// The value as eight big-endian u32 limbs.
    #[must_use]
    pub fn limbs(&self) -> [u32; LIMB_COUNT] {
        encode_u32_limbs(&self.0)
    }
}

impl From<u64> for SecretValue {
    fn from(value: u64) -> Self {
        let mut out = [0u8; HASH_SIZE];
        out[HASH_SIZE - 8..].copy_from_slice(&value.to_be_bytes());
        SecretValue(out)
    }
}

impl From<u128> for SecretValue {
    fn from(value: u128) -> Self {
        let mut out = [0u8; HASH_SIZE];
        out[HASH_SIZE - 16..].copy_from_slice(&value.to_be_bytes());
        SecretValue(out)
    }
}

impl TryFrom<&BigUint> for SecretValue {
    type Error = FixtureError;

    fn try_from(value: &BigUint) -> Result<Self> {
        Self::from_biguint(value)
    }
}

impl FromStr for SecretValue {
    type Err = FixtureError;

    /// Accepts a decimal integer or a `0x`-prefixed hex integer.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex_digits) => BigInt::parse_bytes(hex_digits.as_bytes(), 16),
            None => BigInt::parse_bytes(trimmed.as_bytes(), 10),
        };
        let value =
            parsed.ok_or_else(|| FixtureError::encoding(format!("invalid integer '{trimmed}'")))?;
        Self::from_bigint(&value)
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue([REDACTED])")
    }
}

/// Persisted record of one generated commitment.
///
/// The JSON layout is what downstream tooling reads:
/// `{nullifier, secret, commitment, u32, rootHash?}` where `nullifier` and
/// `secret` are plain JSON integers of up to 256 bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentRecord {
    #[serde(with = "json_integer")]
    pub nullifier: SecretValue,
    #[serde(with = "json_integer")]
    pub secret: SecretValue,
    /// Commitment digest as 64 lowercase hex characters.
    pub commitment: String,
    /// Commitment as eight space-separated u32 decimals.
    #[serde(deserialize_with = "limb_text::deserialize")]
    pub u32: String,
    /// Merkle root the commitment was proven under, as hex.
    #[serde(rename = "rootHash", default, skip_serializing_if = "Option::is_none")]
    pub root_hash: Option<String>,
}

impl CommitmentRecord {
    /// Builds a record for `commitment`, without a root.
    #[must_use]
    pub fn new(nullifier: SecretValue, secret: SecretValue, commitment: &Digest) -> Self {
        CommitmentRecord {
            nullifier,
            secret,
            commitment: hex::encode(commitment),
            u32: limbs_to_string(&encode_u32_limbs(commitment)),
            root_hash: None,
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: &Digest) -> Self {
        self.root_hash = Some(hex::encode(root));
        self
    }

    /// Decodes the stored commitment hex.
    pub fn commitment_digest(&self) -> Result<Digest> {
        digest_from_hex(&self.commitment)
    }

    /// Decodes the stored root hex, if any.
    pub fn root_digest(&self) -> Result<Option<Digest>> {
        self.root_hash.as_deref().map(digest_from_hex).transpose()
    }

    /// Parses the stored `u32` limb text.
    pub fn limbs(&self) -> Result<[u32; LIMB_COUNT]> {
        parse_limbs(&self.u32)
    }
}

/// Serde adapter writing a [`SecretValue`] as a bare JSON integer.
///
/// Relies on `serde_json`'s `arbitrary_precision` so values above `u64::MAX`
/// survive unchanged.
mod json_integer {
    use super::SecretValue;
    use num_bigint::BigInt;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &SecretValue, serializer: S) -> Result<S::Ok, S::Error> {
        let number = serde_json::Number::from_str(&value.to_string()).map_err(S::Error::custom)?;
        number.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretValue, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        let text = number.to_string();
        let value = BigInt::from_str(&text)
            .map_err(|_| D::Error::custom(format!("expected an integer, got {text}")))?;
        SecretValue::from_bigint(&value).map_err(D::Error::custom)
    }
}

/// Reads the `u32` field from either a space-separated string or a list of
/// decimal strings; both layouts exist in history files.
mod limb_text {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LimbText {
        Joined(String),
        Split(Vec<String>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match LimbText::deserialize(deserializer)? {
            LimbText::Joined(text) => text,
            LimbText::Split(parts) => parts.join(" "),
        })
    }
}
