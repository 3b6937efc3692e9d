mod chain;
mod health;
mod mining;
pub mod models;
mod peers;
mod stats;
mod tx;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(mining::mine_block)
            .service(tx::new_transaction)
            .service(tx::pending_transactions)
            .service(peers::register_peers)
            .service(peers::list_peers)
            .service(peers::resolve_conflicts)
            .service(stats::get_stats),
    );
}
