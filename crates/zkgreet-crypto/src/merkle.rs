//! # Membership Merkle Tree
//!
//! A fixed-depth Merkle tree over identity commitments, using Poseidon
//! node hashing and zero-value padding. The depth is pinned at 20 to
//! match the proving circuit; the root binds a membership proof to an
//! exact published set.
//!
//! Levels are built sparsely: only nodes above real leaves are
//! materialized, and missing siblings fall back to the per-level zero
//! hash, so a small set never allocates 2^20 nodes.

use crate::poseidon::{fr_from_dec, poseidon_hash, Fr};
use crate::CryptoError;

/// The fixed tree depth declared by the proving circuit.
pub const TREE_DEPTH: usize = 20;

/// An inclusion path for one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerklePath {
    /// The leaf being proven.
    pub leaf: Fr,
    /// Sibling hashes from the leaf level upward, exactly `depth` long.
    pub siblings: Vec<Fr>,
    /// Per-level position bits: 0 = leaf on the left, 1 = on the right.
    pub path_indices: Vec<u8>,
    /// The tree root the path commits to.
    pub root: Fr,
}

impl MerklePath {
    /// Recompute the root from the leaf and siblings and compare.
    pub fn verify(&self) -> Result<bool, CryptoError> {
        if self.siblings.len() != self.path_indices.len() {
            return Ok(false);
        }
        let mut node = self.leaf;
        for (sibling, bit) in self.siblings.iter().zip(&self.path_indices) {
            node = match bit {
                0 => poseidon_hash(&[node, *sibling])?,
                1 => poseidon_hash(&[*sibling, node])?,
                _ => return Ok(false),
            };
        }
        Ok(node == self.root)
    }
}

/// A fixed-depth Merkle tree over a leaf list.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    depth: usize,
    zeroes: Vec<Fr>,
    levels: Vec<Vec<Fr>>,
}

impl MerkleTree {
    /// Build a tree of the given depth over the leaves, zero-padded on
    /// the right.
    pub fn new(depth: usize, leaves: &[Fr]) -> Result<Self, CryptoError> {
        if depth == 0 {
            return Err(CryptoError::Tree("depth must be at least 1".to_string()));
        }
        if leaves.len() > (1usize << depth.min(63)) {
            return Err(CryptoError::Tree(format!(
                "{} leaves exceed capacity of depth-{depth} tree",
                leaves.len()
            )));
        }

        // Per-level zero hashes: zeroes[0] = 0, zeroes[l+1] = H(z, z).
        let mut zeroes = Vec::with_capacity(depth + 1);
        zeroes.push(Fr::from(0u64));
        for l in 0..depth {
            let z = zeroes[l];
            zeroes.push(poseidon_hash(&[z, z])?);
        }

        let mut levels = Vec::with_capacity(depth + 1);
        levels.push(leaves.to_vec());
        for l in 0..depth {
            let mut next = Vec::with_capacity(levels[l].len().div_ceil(2));
            for pair in 0..levels[l].len().div_ceil(2) {
                let left = levels[l][2 * pair];
                let right = levels[l]
                    .get(2 * pair + 1)
                    .copied()
                    .unwrap_or(zeroes[l]);
                next.push(poseidon_hash(&[left, right])?);
            }
            levels.push(next);
        }

        Ok(Self {
            depth,
            zeroes,
            levels,
        })
    }

    /// The tree root.
    pub fn root(&self) -> Fr {
        self.levels[self.depth]
            .first()
            .copied()
            .unwrap_or(self.zeroes[self.depth])
    }

    /// Number of real (unpadded) leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Build the inclusion path for the leaf at `index`.
    pub fn path(&self, index: usize) -> Result<MerklePath, CryptoError> {
        if index >= self.leaf_count() {
            return Err(CryptoError::Tree(format!(
                "leaf index {index} out of range ({} leaves)",
                self.leaf_count()
            )));
        }

        let mut siblings = Vec::with_capacity(self.depth);
        let mut path_indices = Vec::with_capacity(self.depth);
        let mut pos = index;
        for l in 0..self.depth {
            let sibling_pos = pos ^ 1;
            let sibling = self.levels[l]
                .get(sibling_pos)
                .copied()
                .unwrap_or(self.zeroes[l]);
            siblings.push(sibling);
            path_indices.push((pos & 1) as u8);
            pos >>= 1;
        }

        Ok(MerklePath {
            leaf: self.levels[0][index],
            siblings,
            path_indices,
            root: self.root(),
        })
    }
}

/// The published membership set: an ordered list of identity commitments.
#[derive(Debug, Clone)]
pub struct MembershipSet {
    commitments: Vec<Fr>,
}

impl MembershipSet {
    /// Build a set from field elements, preserving order.
    pub fn new(commitments: Vec<Fr>) -> Self {
        Self { commitments }
    }

    /// Parse a set from the decimal strings the registry publishes.
    pub fn from_dec_strings(values: &[String]) -> Result<Self, CryptoError> {
        let commitments = values
            .iter()
            .map(|v| fr_from_dec(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { commitments })
    }

    /// Number of commitments in the set.
    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }

    /// Prove membership of `commitment` at depth [`TREE_DEPTH`].
    ///
    /// Fails with [`CryptoError::LeafNotFound`] when the commitment is
    /// absent from the set.
    pub fn prove_membership(&self, commitment: Fr) -> Result<MerklePath, CryptoError> {
        let index = self
            .commitments
            .iter()
            .position(|c| *c == commitment)
            .ok_or(CryptoError::LeafNotFound)?;
        let tree = MerkleTree::new(TREE_DEPTH, &self.commitments)?;
        tree.path(index)
    }
}
