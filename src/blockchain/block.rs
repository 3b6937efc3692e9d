use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::pow;
use crate::transaction::Transaction;

/// A single block in the chain. Immutable once forged; the hash is a pure
/// function of the fields below and is recomputed on demand, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // Unix seconds (UTC), fractional
    pub previous_hash: String,
    pub proof: u64,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a block stamped with the current wall-clock time.
    pub fn new(
        index: u64,
        proof: u64,
        previous_hash: String,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self::new_with_timestamp(index, proof, previous_hash, transactions, unix_seconds())
    }

    /// Create a block with an explicit timestamp.
    pub fn new_with_timestamp(
        index: u64,
        proof: u64,
        previous_hash: String,
        transactions: Vec<Transaction>,
        timestamp: f64,
    ) -> Self {
        Self {
            index,
            timestamp,
            previous_hash,
            proof,
            transactions,
        }
    }

    /// SHA-256 hash of the block's canonical JSON encoding.
    ///
    /// Serializing through `serde_json::Value` sorts object keys, so two
    /// blocks with identical field values hash identically no matter how
    /// they were constructed (locally forged or decoded from a peer).
    pub fn compute_hash(&self) -> String {
        let canonical = serde_json::to_value(self).expect("serialize block");
        let mut hasher = Sha256::new();
        hasher.update(canonical.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Validate that this block extends `previous`: the proof pair must
    /// satisfy the puzzle and `previous_hash` must match the predecessor's
    /// recomputed hash. Genesis blocks are never checked with this.
    pub fn is_valid_successor(&self, previous: &Block) -> bool {
        pow::check(previous.proof, self.proof) && self.previous_hash == previous.compute_hash()
    }
}

fn unix_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1e6
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::transaction::Transaction;

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::new("alice", "bob", 5),
            Transaction::new("bob", "carol", 2),
        ]
    }

    fn sample_block(timestamp: f64) -> Block {
        Block::new_with_timestamp(2, 35293, "prev".into(), sample_transactions(), timestamp)
    }

    #[test]
    fn hash_is_deterministic() {
        let a = sample_block(1_700_000_000.25);
        let b = sample_block(1_700_000_000.25);
        assert_eq!(a.compute_hash(), a.compute_hash());
        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn hash_changes_when_tampered() {
        let block = sample_block(1_700_000_000.25);
        let original = block.compute_hash();

        let mut tampered = block.clone();
        tampered.transactions.push(Transaction::new("mallory", "mallory", 1000));
        assert_ne!(original, tampered.compute_hash());

        let mut reordered = block.clone();
        reordered.transactions.reverse();
        assert_ne!(original, reordered.compute_hash());
    }

    #[test]
    fn hash_survives_wire_round_trip() {
        let block = Block::new(3, 35089, "prev".into(), sample_transactions());
        let json = serde_json::to_string(&block).expect("serialize");
        let decoded: Block = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(block.compute_hash(), decoded.compute_hash());
    }

    #[test]
    fn successor_validity() {
        let genesis = Block::new_with_timestamp(1, 100, "1".into(), Vec::new(), 1_700_000_000.0);
        let next = Block::new_with_timestamp(
            2,
            35293,
            genesis.compute_hash(),
            sample_transactions(),
            1_700_000_100.0,
        );
        assert!(next.is_valid_successor(&genesis));

        let mut bad_link = next.clone();
        bad_link.previous_hash = "forged".into();
        assert!(!bad_link.is_valid_successor(&genesis));

        let mut bad_proof = next.clone();
        bad_proof.proof = 35294;
        assert!(!bad_proof.is_valid_successor(&genesis));
    }
}
