use std::sync::Mutex;

use log::{info, warn};

use super::peer::{self, ChainSnapshot};
use crate::blockchain::{Block, Blockchain};
use crate::error::Result;

/// Longest-chain consensus: poll every known peer for its chain, keep the
/// longest self-consistent candidate strictly longer than ours, and adopt
/// it. Returns whether the local chain was replaced.
///
/// The lock is only held to snapshot peers and to swap the chain in, never
/// across network I/O.
pub async fn resolve(ledger: &Mutex<Blockchain>) -> bool {
    let (peers, local_len) = {
        let ledger = ledger.lock().expect("mutex poisoned");
        let peers: Vec<String> = ledger.peers().iter().cloned().collect();
        (peers, ledger.len())
    };
    if peers.is_empty() {
        return false;
    }

    let client = peer::client();
    let mut candidates = Vec::with_capacity(peers.len());
    for location in &peers {
        candidates.push(peer::fetch_chain(&client, location).await);
    }

    let Some((length, chain)) = select_chain(local_len, candidates) else {
        return false;
    };

    let mut ledger = ledger.lock().expect("mutex poisoned");
    // The tip may have moved while we were fetching; only adopt a chain
    // still longer than what we hold now.
    if length <= ledger.len() {
        return false;
    }
    info!(
        "adopting a peer chain of length {length} (local length was {})",
        ledger.len()
    );
    ledger.replace_chain(chain);
    true
}

/// Pick the longest valid candidate strictly longer than `local_len`.
/// Fetch failures and invalid chains are skipped; ties never win.
fn select_chain(
    local_len: usize,
    candidates: Vec<Result<ChainSnapshot>>,
) -> Option<(usize, Vec<Block>)> {
    let mut max_length = local_len;
    let mut winner = None;

    for candidate in candidates {
        let snapshot = match candidate {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("skipping peer during resolution: {err}");
                continue;
            }
        };
        if snapshot.length > max_length && is_valid_chain(&snapshot.chain) {
            max_length = snapshot.length;
            winner = Some((snapshot.length, snapshot.chain));
        }
    }

    winner
}

/// A chain is self-consistent when every block extends its predecessor.
/// The first block is trusted as that snapshot's genesis and checked
/// against nothing.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    chain.windows(2).all(|pair| pair[1].is_valid_successor(&pair[0]))
}
