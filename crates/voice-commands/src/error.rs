use crate::Intent;
use std::net::SocketAddr;
use thiserror::Error;

pub type Result<T, E = ClassifierError> = core::result::Result<T, E>;

/// Reasons a keyword table is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    #[error("keyword table is empty")]
    EmptyTable,
    #[error("intent `{0}` appears more than once in the keyword table")]
    DuplicateIntent(Intent),
    #[error("`unknown` is the fallback and cannot own keywords")]
    UnknownEntry,
    #[error("intent `{0}` has an empty keyword, which would match everything")]
    EmptyKeyword(Intent),
}

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind UDP socket on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}
