//! Fixed-depth Merkle tree over SHA-256 digests.
//!
//! The tree holds up to `2^depth` leaves in insertion order. Levels are
//! derived on demand: each level pairs nodes left to right, and an unpaired
//! last node is hashed with itself rather than carried up unchanged. The
//! structure always has `depth + 1` levels, so every authentication path has
//! exactly `depth` entries regardless of how many leaves are filled.

use crate::error::{FixtureError, Result};
use crate::types::{Digest, ZERO_DIGEST};
use crate::utils::hash_pair;
use crate::MAX_TREE_DEPTH;
use log::debug;
use std::fmt;

/// Fill state of a [`MerkleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeState {
    Empty,
    Filling,
    Full,
}

/// A Merkle proof for leaf inclusion.
///
/// `directions[i]` is `true` when the path node at level `i` is a right child,
/// in which case `siblings[i]` is hashed on the left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    pub leaf: Digest,
    pub root: Digest,
    pub siblings: Vec<Digest>,
    pub directions: Vec<bool>,
    pub index: usize,
}

impl MerkleProof {
    /// Recomputes the root by folding the leaf with each sibling.
    #[must_use]
    pub fn compute_root(&self) -> Digest {
        compute_root_from_path(&self.leaf, &self.siblings, &self.directions)
    }

    /// Checks the path against `root`.
    #[must_use]
    pub fn verify(&self, root: &Digest) -> bool {
        self.siblings.len() == self.directions.len() && self.compute_root() == *root
    }

    /// Direction bits as circuit tokens, `0` for left and `1` for right.
    #[must_use]
    pub fn direction_bits(&self) -> Vec<u8> {
        self.directions.iter().map(|&right| u8::from(right)).collect()
    }
}

/// Folds `leaf` up an authentication path.
#[must_use]
pub fn compute_root_from_path(leaf: &Digest, siblings: &[Digest], directions: &[bool]) -> Digest {
    siblings
        .iter()
        .zip(directions)
        .fold(*leaf, |current, (sibling, &is_right)| {
            if is_right {
                hash_pair(sibling, &current)
            } else {
                hash_pair(&current, sibling)
            }
        })
}

/// An append-only binary Merkle tree with capacity `2^depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    depth: u32,
    capacity: usize,
    leaves: Vec<Digest>,
}

/// Reduces one level to the next, duplicating an unpaired last node.
fn next_level(level: &[Digest]) -> Vec<Digest> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_pair(left, right),
            [single] => hash_pair(single, single),
            _ => unreachable!("chunks(2) yields one or two nodes"),
        })
        .collect()
}

impl MerkleTree {
    /// Create an empty tree of the given depth.
    ///
    /// # Errors
    /// Returns [`FixtureError::InvalidDepth`] if `depth` exceeds
    /// [`MAX_TREE_DEPTH`] or `2^depth` does not fit in `usize`.
    pub fn new(depth: u32) -> Result<Self> {
        let capacity = (depth <= MAX_TREE_DEPTH)
            .then(|| 1usize.checked_shl(depth))
            .flatten()
            .ok_or(FixtureError::InvalidDepth { depth })?;

        Ok(MerkleTree {
            depth,
            capacity,
            leaves: Vec::new(),
        })
    }

    /// Create a tree and insert `leaves` in order.
    pub fn with_leaves(depth: u32, leaves: impl IntoIterator<Item = Digest>) -> Result<Self> {
        let mut tree = Self::new(depth)?;
        for leaf in leaves {
            tree.add_leaf(leaf)?;
        }
        Ok(tree)
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    #[must_use]
    pub fn leaves(&self) -> &[Digest] {
        &self.leaves
    }

    #[must_use]
    pub fn state(&self) -> TreeState {
        match self.leaves.len() {
            0 => TreeState::Empty,
            n if n == self.capacity => TreeState::Full,
            _ => TreeState::Filling,
        }
    }

    /// Append a leaf and return its index.
    ///
    /// # Errors
    /// Returns [`FixtureError::TreeFull`] once `capacity` leaves are present.
    pub fn add_leaf(&mut self, leaf: Digest) -> Result<usize> {
        if self.state() == TreeState::Full {
            return Err(FixtureError::TreeFull {
                capacity: self.capacity,
            });
        }
        self.leaves.push(leaf);
        Ok(self.leaves.len() - 1)
    }

    /// Derive every level, leaves first and root last.
    ///
    /// An empty tree yields a single empty level.
    #[must_use]
    pub fn build_levels(&self) -> Vec<Vec<Digest>> {
        let mut levels = vec![self.leaves.clone()];
        if self.leaves.is_empty() {
            return levels;
        }

        for _ in 0..self.depth {
            let next = next_level(&levels[levels.len() - 1]);
            levels.push(next);
        }

        debug!(
            "Built {} levels over {} leaves (depth {})",
            levels.len(),
            self.leaves.len(),
            self.depth
        );
        levels
    }

    /// The root digest, or [`ZERO_DIGEST`] for an empty tree.
    #[must_use]
    pub fn root(&self) -> Digest {
        self.build_levels()
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(ZERO_DIGEST)
    }

    /// Generate a Merkle proof for the leaf at `leaf_index`.
    ///
    /// At each level the sibling is the node at `index ^ 1`; an unpaired last
    /// node is its own sibling, matching the duplication in [`build_levels`].
    ///
    /// # Errors
    /// Returns [`FixtureError::IndexOutOfRange`] if no leaf exists at `leaf_index`.
    ///
    /// [`build_levels`]: MerkleTree::build_levels
    pub fn generate_proof(&self, leaf_index: usize) -> Result<MerkleProof> {
        if leaf_index >= self.leaves.len() {
            return Err(FixtureError::IndexOutOfRange {
                index: leaf_index,
                len: self.leaves.len(),
            });
        }

        let levels = self.build_levels();
        let mut siblings = Vec::with_capacity(self.depth as usize);
        let mut directions = Vec::with_capacity(self.depth as usize);
        let mut index = leaf_index;

        for level in &levels[..levels.len() - 1] {
            let sibling_index = index ^ 1;
            let sibling = level.get(sibling_index).unwrap_or(&level[index]);
            siblings.push(*sibling);
            directions.push(index % 2 == 1);
            index /= 2;
        }

        let root = levels[levels.len() - 1][0];
        Ok(MerkleProof {
            leaf: self.leaves[leaf_index],
            root,
            siblings,
            directions,
            index: leaf_index,
        })
    }

    /// Verify a Merkle proof against this tree's root.
    #[must_use]
    pub fn verify_proof(&self, proof: &MerkleProof) -> bool {
        let root = self.root();
        proof.root == root && proof.verify(&root)
    }
}

impl fmt::Display for MerkleProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MerkleProof:\n  Leaf: {}\n  Root: {}\n  Index: {}\n  Siblings: {}",
            hex::encode(self.leaf),
            hex::encode(self.root),
            self.index,
            self.siblings.len()
        )
    }
}
