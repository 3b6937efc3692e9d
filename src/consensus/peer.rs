use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::blockchain::Block;
use crate::error::{Error, Result};

/// Shape peers serve from `GET /api/v1/chain/`.
#[derive(Debug, Deserialize)]
pub struct ChainSnapshot {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Bound on every peer request so one dead peer cannot stall a pass.
pub const PEER_TIMEOUT: Duration = Duration::from_secs(5);

const CHAIN_BODY_LIMIT: usize = 4 * 1024 * 1024;

pub fn client() -> awc::Client {
    awc::Client::builder().timeout(PEER_TIMEOUT).finish()
}

/// Download a peer's full chain snapshot. Each failure kind gets its own
/// error so resolution logs say what actually went wrong.
pub async fn fetch_chain(client: &awc::Client, location: &str) -> Result<ChainSnapshot> {
    let url = format!("http://{location}/api/v1/chain/");
    let mut response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|err| Error::PeerUnreachable(location.to_string(), err.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::PeerBadStatus(
            location.to_string(),
            response.status().as_u16(),
        ));
    }

    response
        .json::<ChainSnapshot>()
        .limit(CHAIN_BODY_LIMIT)
        .await
        .map_err(|err| Error::PeerBadPayload(location.to_string(), err.to_string()))
}

/// Ask every peer to run conflict resolution. Fired right after a
/// successful local mine; best-effort, failures are logged and dropped.
pub async fn notify_peers(peers: Vec<String>) {
    let client = client();
    for location in peers {
        let url = format!("http://{location}/api/v1/peers/resolve/");
        match client.get(url.as_str()).send().await {
            Ok(_) => debug!("notified {location} to resolve"),
            Err(err) => debug!("resolve notification to {location} failed: {err}"),
        }
    }
}
