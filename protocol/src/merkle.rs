//! Merkle root computation over ordered digest sequences.
//!
//! Digests are paired pairwise in input order and combined
//! (`sha256(left || right)`) level by level until one remains. An unpaired
//! trailing node at a level is promoted to the next level unchanged, never
//! duplicated — the consensus layer requires this pairing policy bit-exactly.
//!
//! An empty input yields the digest of hashing an empty byte buffer rather
//! than a sentinel zero value, so transactions with no operations and blocks
//! with no transactions still carry a well-defined, verifiable root.

use mason_cryptography::{hash, Digest, Hasher, Multihash, Sha256};

/// Computes the Merkle root of an ordered sequence of digests, wrapped as a
/// self-describing multihash.
pub fn root(leaves: &[Digest]) -> Multihash {
    if leaves.is_empty() {
        return Multihash::wrap(hash(&[]));
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        let mut pairs = level.chunks_exact(2);
        for pair in pairs.by_ref() {
            next.push(combine(&pair[0], &pair[1]));
        }
        if let [odd] = pairs.remainder() {
            next.push(*odd);
        }
        level = next;
    }
    Multihash::wrap(level[0])
}

fn combine(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(left.as_ref());
    hasher.update(right.as_ref());
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_cryptography::hex;

    const EMPTY_ROOT: &str =
        "1220e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn leaves() -> Vec<Digest> {
        [
            b"transfer alice->bob 100".as_slice(),
            b"transfer bob->carol 50",
            b"mint carol 7",
            b"burn dave 1",
            b"vote eve yes",
        ]
        .iter()
        .map(|message| hash(message))
        .collect()
    }

    #[test]
    fn test_empty_root_is_hash_of_empty_buffer() {
        assert_eq!(hex(&root(&[]).encode()), EMPTY_ROOT);
    }

    #[test]
    fn test_single_leaf_promotes_unchanged() {
        let leaf = hash(b"only");
        assert_eq!(root(&[leaf]).digest(), leaf);
    }

    #[test]
    fn test_two_leaves_golden() {
        let leaves = leaves();
        let computed = root(&leaves[..2]);
        assert_eq!(
            hex(computed.digest().as_ref()),
            "00ba35108626b717e1f94ef824310ad4a49558e04e9fc2f30f176c8f486bca65",
        );
    }

    // Odd count: the trailing leaf is promoted, so the root is
    // sha256(sha256(dA || dB) || dC).
    #[test]
    fn test_three_leaves_golden() {
        let leaves = leaves();
        let computed = root(&leaves[..3]);
        assert_eq!(
            hex(computed.digest().as_ref()),
            "52b65de75334849d6db9f14cf5599aa75a0b5d399b4790f69f7892b8f184ff00",
        );
    }

    #[test]
    fn test_four_leaves_golden() {
        let leaves = leaves();
        let computed = root(&leaves[..4]);
        assert_eq!(
            hex(computed.digest().as_ref()),
            "946ee60cf627df0a640c6fa54c27b269e64b997792b4ef8a758e50dbe682d2d8",
        );
    }

    // Five leaves exercise promotion across two levels.
    #[test]
    fn test_five_leaves_golden() {
        let leaves = leaves();
        let computed = root(&leaves);
        assert_eq!(
            hex(computed.digest().as_ref()),
            "a55ebf9cb765d248a2103f1dad441011fe1d588b23101854686ace855f713d34",
        );
    }

    #[test]
    fn test_deterministic() {
        let leaves = leaves();
        assert_eq!(root(&leaves), root(&leaves));
    }

    #[test]
    fn test_order_sensitive() {
        let leaves = leaves();
        let swapped = [leaves[1], leaves[0]];
        assert_ne!(root(&leaves[..2]), root(&swapped));
        assert_eq!(
            hex(root(&swapped).digest().as_ref()),
            "6df532d861b426d0a54c8e79fa6ea60012f992de5a91d31722fb94454abe8177",
        );
    }
}
