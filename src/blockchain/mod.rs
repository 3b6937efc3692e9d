pub mod block;
pub mod model;
pub mod pow;

pub use block::Block;
pub use model::Blockchain;

/// Hex prefix a puzzle digest must carry to be accepted (fixed difficulty).
pub const PROOF_PREFIX: &str = "0000";

/// Sender identity stamped on system-minted reward transactions.
pub const REWARD_SENDER: &str = "0";

/// Amount granted to the miner of each new block.
pub const MINING_REWARD: u64 = 1;

/// Proof recorded on the genesis block (not derived from a predecessor).
pub const GENESIS_PROOF: u64 = 100;

/// Placeholder previous-hash recorded on the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
