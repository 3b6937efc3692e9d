use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{AppState, PeersResponse, RegisterPeersRequest, ResolveResponse};
use crate::consensus;

fn sorted_peers(ledger: &crate::blockchain::Blockchain) -> Vec<String> {
    let mut peers: Vec<String> = ledger.peers().iter().cloned().collect();
    peers.sort();
    peers
}

/// Register a batch of peer addresses. Entries without a usable host are
/// logged and skipped; the request itself still succeeds with whatever the
/// peer set looks like afterwards.
#[post("/peers/register/")]
pub async fn register_peers(
    state: web::Data<AppState>,
    body: web::Json<RegisterPeersRequest>,
) -> impl Responder {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    for address in &body.peers {
        match ledger.register_peer(address) {
            Ok(location) => debug!("registered peer {location}"),
            Err(err) => warn!("{err}"),
        }
    }

    HttpResponse::Created().json(PeersResponse {
        peers: sorted_peers(&ledger),
    })
}

/// List known peer locations.
#[get("/peers/")]
pub async fn list_peers(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PeersResponse {
        peers: sorted_peers(&ledger),
    })
}

/// Run longest-chain resolution against all known peers.
#[get("/peers/resolve/")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let replaced = consensus::resolve(&state.ledger).await;

    let ledger = state.ledger.lock().expect("mutex poisoned");
    let message = if replaced {
        "Local chain was replaced"
    } else {
        "Local chain is authoritative"
    };
    HttpResponse::Ok().json(ResolveResponse {
        message,
        replaced,
        length: ledger.len(),
        chain: &ledger.chain,
    })
}
