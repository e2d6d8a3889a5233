//! Circuit fixture assembly.
//!
//! A fixture places the real commitment at leaf 0 of a fixed-depth tree,
//! fills the remaining slots with random filler leaves and limb-encodes every
//! value the circuit consumes.

use crate::commitment::{commit, nullifier_hash};
use crate::error::Result;
use crate::merkle::{MerkleProof, MerkleTree};
use crate::types::{CommitmentRecord, Digest, SecretValue};
use crate::utils::{encode_u32_limbs, limbs_to_string, sha256, LIMB_COUNT};
use crate::DEFAULT_TREE_DEPTH;
use log::debug;
use rand::RngCore;
use std::fmt;

/// Leaf position of the real commitment.
pub const COMMITMENT_LEAF_INDEX: usize = 0;

/// Bytes of randomness hashed into each filler leaf.
const FILLER_PREIMAGE_LEN: usize = 64;

/// A leaf with no meaning beyond occupying capacity.
pub fn filler_leaf<R: RngCore + ?Sized>(rng: &mut R) -> Digest {
    let mut preimage = [0u8; FILLER_PREIMAGE_LEN];
    rng.fill_bytes(&mut preimage);
    sha256(&preimage)
}

/// Numeric circuit inputs in the order the circuit declares them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitInputs {
    pub root: [u32; LIMB_COUNT],
    pub nullifier_hash: [u32; LIMB_COUNT],
    pub nullifier: [u32; LIMB_COUNT],
    pub secret: [u32; LIMB_COUNT],
    pub commitment: [u32; LIMB_COUNT],
    pub directions: Vec<u8>,
    pub siblings: Vec<[u32; LIMB_COUNT]>,
}

impl CircuitInputs {
    /// One line per input: five limb lines, the direction bits, then one line
    /// per path sibling.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(6 + self.siblings.len());
        lines.push(limbs_to_string(&self.root));
        lines.push(limbs_to_string(&self.nullifier_hash));
        lines.push(limbs_to_string(&self.nullifier));
        lines.push(limbs_to_string(&self.secret));
        lines.push(limbs_to_string(&self.commitment));
        lines.push(
            self.directions
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        );
        lines.extend(self.siblings.iter().map(limbs_to_string));
        lines
    }

    /// Every token as a flat argument list, as `compute-witness -a` takes it.
    #[must_use]
    pub fn witness_args(&self) -> Vec<String> {
        self.to_lines()
            .iter()
            .flat_map(|line| line.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }
}

impl fmt::Display for CircuitInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lines().join("\n"))
    }
}

/// Everything produced for one commitment.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub nullifier: SecretValue,
    pub secret: SecretValue,
    pub commitment: Digest,
    pub nullifier_hash: Digest,
    pub tree: MerkleTree,
    pub proof: MerkleProof,
    pub inputs: CircuitInputs,
}

impl Fixture {
    #[must_use]
    pub fn root(&self) -> Digest {
        self.proof.root
    }

    /// History record for this fixture, including the root.
    #[must_use]
    pub fn to_record(&self) -> CommitmentRecord {
        CommitmentRecord::new(self.nullifier, self.secret, &self.commitment)
            .with_root(&self.proof.root)
    }
}

/// Builds fixtures for trees of a fixed depth.
#[derive(Debug, Clone, Copy)]
pub struct FixtureAssembler {
    depth: u32,
}

impl Default for FixtureAssembler {
    fn default() -> Self {
        FixtureAssembler {
            depth: DEFAULT_TREE_DEPTH,
        }
    }
}

impl FixtureAssembler {
    #[must_use]
    pub fn new(depth: u32) -> Self {
        FixtureAssembler { depth }
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Assemble a fixture for `(nullifier, secret)`.
    ///
    /// # Errors
    /// Returns [`crate::FixtureError::InvalidDepth`] if the configured depth
    /// cannot be built.
    pub fn assemble<R: RngCore + ?Sized>(
        &self,
        nullifier: SecretValue,
        secret: SecretValue,
        rng: &mut R,
    ) -> Result<Fixture> {
        let commitment = commit(&nullifier, &secret);
        self.assemble_with_commitment(nullifier, secret, commitment, rng)
    }

    /// Assemble a fixture around a commitment that was computed earlier,
    /// such as one read back from a commitment file.
    pub fn assemble_with_commitment<R: RngCore + ?Sized>(
        &self,
        nullifier: SecretValue,
        secret: SecretValue,
        commitment: Digest,
        rng: &mut R,
    ) -> Result<Fixture> {
        let mut tree = MerkleTree::new(self.depth)?;
        tree.add_leaf(commitment)?;
        while tree.len() < tree.capacity() {
            tree.add_leaf(filler_leaf(rng))?;
        }
        debug!(
            "Filled tree of depth {} with {} filler leaves",
            self.depth,
            tree.capacity() - 1
        );

        let proof = tree.generate_proof(COMMITMENT_LEAF_INDEX)?;
        let nullifier_hash = nullifier_hash(&nullifier);
        debug!("Fixture root: {}", hex::encode(proof.root));

        let inputs = CircuitInputs {
            root: encode_u32_limbs(&proof.root),
            nullifier_hash: encode_u32_limbs(&nullifier_hash),
            nullifier: nullifier.limbs(),
            secret: secret.limbs(),
            commitment: encode_u32_limbs(&commitment),
            directions: proof.direction_bits(),
            siblings: proof.siblings.iter().map(encode_u32_limbs).collect(),
        };

        Ok(Fixture {
            nullifier,
            secret,
            commitment,
            nullifier_hash,
            tree,
            proof,
            inputs,
        })
    }
}
