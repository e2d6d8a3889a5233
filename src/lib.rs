//! ZKP Commitment Fixtures
//!
//! This library produces deterministic inputs for a zero-knowledge circuit that
//! proves knowledge of a `(nullifier, secret)` pair committed into a fixed-depth
//! Merkle tree.
//!
//! # Components
//!
//! - [`commitment`]: `SHA-256(nullifier || secret)` commitments and nullifier hashes
//! - [`MerkleTree`]: Fixed-capacity binary Merkle tree with authentication paths
//! - [`utils::encode_u32_limbs`]: Digest to big-endian u32 limb encoding
//! - [`FixtureAssembler`]: Builds the numeric circuit inputs for one commitment
//! - [`history`]: JSON persistence of [`CommitmentRecord`]s
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use zkp_commitment_fixtures::{FixtureAssembler, SecretValue};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let fixture = FixtureAssembler::default()
//!     .assemble(SecretValue::from(1234545679u64), SecretValue::from(987654321u64), &mut rng)
//!     .unwrap();
//! assert_eq!(fixture.inputs.to_lines().len(), 9);
//! ```

pub mod commitment;
pub mod config;
pub mod error;
pub mod fixture;
pub mod history;
pub mod merkle;
pub mod types;
pub mod utils;


pub use commitment::{commit, nullifier_hash};
pub use error::{FixtureError, Result};
pub use fixture::{CircuitInputs, Fixture, FixtureAssembler};
pub use merkle::{MerkleProof, MerkleTree, TreeState};
pub use types::{CommitmentRecord, Digest, SecretValue, HASH_SIZE, ZERO_DIGEST};
pub use utils::encode_u32_limbs;

/// Tree depth the circuit is compiled for.
///
/// A depth of 3 gives 8 leaves and 3 path elements. Changing it changes the
/// number of direction bits and sibling lines, so the circuit must be
/// recompiled to match.
pub const DEFAULT_TREE_DEPTH: u32 = 3;

/// Largest depth [`MerkleTree::new`] accepts.
pub const MAX_TREE_DEPTH: u32 = 32;
