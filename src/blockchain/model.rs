use std::collections::HashSet;

use url::Url;

use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF, MINING_REWARD, REWARD_SENDER, pow};
use crate::error::{Error, Result};
use crate::transaction::Transaction;

/// In-memory ledger: the chain itself, the pool of transactions waiting to
/// be mined, and the set of known peer locations.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    pending: Vec<Transaction>,
    peers: HashSet<String>,
}

impl Blockchain {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
            peers: HashSet::new(),
        };
        ledger.forge_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        ledger
    }

    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn peers(&self) -> &HashSet<String> {
        &self.peers
    }

    /// Queue a transaction for inclusion in the next mined block. Returns
    /// the index of the block that will eventually hold it.
    pub fn submit_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: u64,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, recipient, amount));
        self.last_block().index + 1
    }

    /// Mine one block: solve the puzzle seeded by the current tip's proof,
    /// queue the miner's reward so it lands in the block it rewards, and
    /// forge. The puzzle search is CPU-bound and runs to completion.
    pub fn mine(&mut self, miner: &str) -> &Block {
        let last = self.last_block();
        let last_proof = last.proof;
        let previous_hash = last.compute_hash();

        let proof = pow::solve(last_proof);

        self.submit_transaction(REWARD_SENDER, miner, MINING_REWARD);
        self.forge_block(proof, Some(previous_hash))
    }

    /// Append a new block carrying the whole pending pool. The pool is
    /// drained in the same step; this is the only place the chain grows.
    /// Indices are 1-based: genesis is 1, each block is `len + 1`.
    pub fn forge_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().compute_hash());
        let block = Block::new(
            self.chain.len() as u64 + 1,
            proof,
            previous_hash,
            std::mem::take(&mut self.pending),
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Register a peer by its network location (normalized `host:port`,
    /// extracted from a URL). Returns the stored location, or an error for
    /// addresses without a usable host; callers decide whether to surface
    /// or just log the rejection.
    pub fn register_peer(&mut self, address: &str) -> Result<String> {
        let invalid = || Error::InvalidPeerAddress(address.to_string());
        let parsed = Url::parse(address.trim()).map_err(|_| invalid())?;
        let host = parsed.host_str().ok_or_else(invalid)?;
        let location = match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        self.peers.insert(location.clone());
        Ok(location)
    }

    /// Swap in a replacement chain adopted from a peer. The pending pool
    /// and peer set are untouched.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Blockchain;
    use crate::blockchain::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF, MINING_REWARD, REWARD_SENDER};
    use crate::transaction::Transaction;

    #[test]
    fn starts_with_genesis() {
        let ledger = Blockchain::new();
        assert_eq!(ledger.len(), 1);

        let genesis = ledger.last_block();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, GENESIS_PROOF);
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(genesis.transactions.is_empty());
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn submit_reports_target_block_index() {
        let mut ledger = Blockchain::new();
        assert_eq!(ledger.submit_transaction("alice", "bob", 5), 2);
        assert_eq!(ledger.submit_transaction("bob", "alice", 3), 2);
        assert_eq!(ledger.pending().len(), 2);
    }

    #[test]
    fn mine_seals_pending_plus_reward_and_drains_pool() {
        let mut ledger = Blockchain::new();
        ledger.submit_transaction("alice", "bob", 5);

        let block = ledger.mine("miner-1").clone();
        assert_eq!(block.index, 2);
        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.transactions[0], Transaction::new("alice", "bob", 5));
        assert_eq!(
            block.transactions[1],
            Transaction::new(REWARD_SENDER, "miner-1", MINING_REWARD)
        );
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn mined_chain_keeps_linkage() {
        let mut ledger = Blockchain::new();
        ledger.submit_transaction("alice", "bob", 5);
        ledger.mine("miner-1");
        ledger.mine("miner-1");

        for pair in ledger.chain.windows(2) {
            assert!(pair[1].is_valid_successor(&pair[0]));
        }
    }

    #[test]
    fn register_peer_normalizes_and_dedupes() {
        let mut ledger = Blockchain::new();
        let stored = ledger.register_peer("http://192.168.0.5:5000").expect("valid address");
        assert_eq!(stored, "192.168.0.5:5000");

        ledger
            .register_peer("http://192.168.0.5:5000/chain/")
            .expect("path is ignored");
        assert_eq!(ledger.peers().len(), 1);

        ledger.register_peer("https://node.example.com").expect("no port is fine");
        assert!(ledger.peers().contains("node.example.com"));
    }

    #[test]
    fn register_peer_rejects_hostless_addresses() {
        let mut ledger = Blockchain::new();
        assert!(ledger.register_peer("").is_err());
        assert!(ledger.register_peer("http://").is_err());
        // No scheme means no network location to extract.
        assert!(ledger.register_peer("192.168.0.5:5000").is_err());
        assert!(ledger.peers().is_empty());
    }

    #[test]
    fn replace_chain_swaps_wholesale() {
        let mut donor = Blockchain::new();
        donor.mine("miner-1");
        let longer = donor.chain.clone();

        let mut ledger = Blockchain::new();
        ledger.replace_chain(longer.clone());
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.last_block().index, longer[1].index);
    }
}
