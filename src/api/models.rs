use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

use crate::blockchain::{Block, Blockchain};
use crate::transaction::Transaction;

/// Shared application state: the ledger behind a lock, plus the identity
/// credited when this node mines (a dashless UUIDv4 minted at startup).
pub struct AppState {
    pub node_id: String,
    pub ledger: Mutex<Blockchain>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            node_id: Uuid::new_v4().simple().to_string(),
            ledger: Mutex::new(Blockchain::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/* ---------- Chain API Models ---------- */

/// Also the shape the resolver consumes from peers (`ChainSnapshot`).
#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- Mining API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub block: Block,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTransactionRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Serialize)]
pub struct NewTransactionResponse {
    pub message: String,
    pub block_index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Peer API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterPeersRequest {
    pub peers: Vec<String>,
}

#[derive(Serialize)]
pub struct PeersResponse {
    pub peers: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse<'a> {
    pub message: &'static str,
    pub replaced: bool,
    pub length: usize,
    pub chain: &'a [Block],
}

/* ---------- Stats API Models ---------- */

#[derive(Serialize)]
pub struct StatsResponse {
    pub height: usize,
    pub pending_transactions: usize,
    pub peers: usize,
    pub last_block_timestamp: f64,
}
