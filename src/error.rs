use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("peer address {0:?} has no usable host")]
    InvalidPeerAddress(String),
    #[error("peer {0} is unreachable: {1}")]
    PeerUnreachable(String, String),
    #[error("peer {0} answered with status {1}")]
    PeerBadStatus(String, u16),
    #[error("peer {0} sent a malformed chain payload: {1}")]
    PeerBadPayload(String, String),
}
