use std::time::Duration;

use alloy::transports::TransportError;

/// Failure reported by a [`Network`](super::network::Network) implementation.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct NetworkError {
    reason: String,
    #[source]
    source: Option<TransportError>,
}

impl NetworkError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            source: None,
        }
    }
}

impl From<TransportError> for NetworkError {
    fn from(err: TransportError) -> Self {
        Self {
            reason: err.to_string(),
            source: Some(err),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    #[error("Network unreachable: {0}")]
    Connectivity(#[source] NetworkError),

    #[error("Network did not report its chain id within {timeout:?}")]
    ConnectivityTimeout { timeout: Duration },

    #[error("Failed to read ENS registry: {0}")]
    RegistryRead(#[source] NetworkError),

    #[error("No reverse registrar deployed on chain {chain_id}")]
    RegistrarNotFound { chain_id: u64 },

    #[error("Signing failed: {reason}")]
    Signing { reason: String },

    #[error("Transaction submission failed: {0}")]
    Submission(#[source] NetworkError),

    #[error("Contract call failed: {0}")]
    Call(#[source] NetworkError),

    #[error("Failed to decode contract response: {0}")]
    Decode(#[from] alloy::sol_types::Error),
}

impl RegistrarError {
    /// The network answered, but nothing is registered under `addr.reverse`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RegistrarNotFound { .. })
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::Connectivity(_) | Self::ConnectivityTimeout { .. }
        )
    }

    pub(crate) fn signing(reason: impl ToString) -> Self {
        Self::Signing {
            reason: reason.to_string(),
        }
    }
}
