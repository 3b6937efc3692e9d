use actix_web::{HttpResponse, Responder, get, rt, web};
use log::{info, warn};

use super::models::{AppState, MineResponse};
use crate::consensus::peer;

/// Mine one block rewarded to this node's identity. The puzzle search is
/// CPU-bound and unbounded, so the whole critical section runs on the
/// blocking pool instead of stalling an executor thread. Afterwards every
/// known peer is told to resolve, best-effort.
#[get("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let worker = state.clone();
    let mined = web::block(move || {
        let mut ledger = worker.ledger.lock().expect("mutex poisoned");
        let block = ledger.mine(&worker.node_id).clone();
        let peers: Vec<String> = ledger.peers().iter().cloned().collect();
        (block, peers)
    })
    .await;

    let (block, peers) = match mined {
        Ok(result) => result,
        Err(err) => {
            warn!("mining task failed: {err}");
            return HttpResponse::InternalServerError().body("mining task failed");
        }
    };

    info!(
        "MINER - forged block #{} (proof={}, txs={})",
        block.index,
        block.proof,
        block.transactions.len()
    );

    if !peers.is_empty() {
        rt::spawn(peer::notify_peers(peers));
    }

    HttpResponse::Ok().json(MineResponse {
        message: "New block forged",
        block,
    })
}
