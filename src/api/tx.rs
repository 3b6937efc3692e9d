use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, NewTransactionRequest, NewTransactionResponse, PendingResponse};

/// Submit a transaction into the pending pool. No business rule beyond
/// field presence is enforced; zero amounts and self-transfers pass.
#[post("/transactions/new/")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransactionRequest>,
) -> impl Responder {
    let body = body.into_inner();
    let block_index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.submit_transaction(body.sender, body.recipient, body.amount)
    };
    debug!("queued transaction for block #{block_index}");

    HttpResponse::Created().json(NewTransactionResponse {
        message: format!("Transaction will be added to block {block_index}"),
        block_index,
    })
}

/// List transactions waiting for the next mined block.
#[get("/transactions/pending/")]
pub async fn pending_transactions(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PendingResponse {
        size: ledger.pending().len(),
        transactions: ledger.pending(),
    })
}
