mod blockr;
mod electrs;
#[cfg(test)]
pub(crate) mod stub;

pub use blockr::*;
pub use electrs::*;

use crate::error::TrackerError;
use crate::types::UnspentOutput;
use bitcoin::Txid;
use std::sync::Arc;
use utxo_util::{GatewayBackend, GatewayConfig};

/// Remote index and broadcast service.
///
/// Implementations do not retry and do not cache; failures are returned as is.
#[async_trait::async_trait]
pub trait IndexGateway: Send + Sync {
    fn network_name(&self) -> &str;

    async fn query_unspent(&self, address: &str) -> Result<Vec<UnspentOutput>, TrackerError>;

    // Returns the txid reported by the gateway once it has accepted the tx
    async fn broadcast(&self, raw_tx: &[u8]) -> Result<Txid, TrackerError>;
}

pub type IndexGatewayRef = Arc<Box<dyn IndexGateway>>;

pub fn create_gateway(config: &GatewayConfig) -> Result<IndexGatewayRef, TrackerError> {
    info!(
        "Creating {} gateway, testnet: {}",
        config.backend, config.testnet
    );

    let gateway: Box<dyn IndexGateway> = match config.backend {
        GatewayBackend::Blockr => Box::new(BlockrGateway::new(config)?),
        GatewayBackend::Electrs => Box::new(ElectrsGateway::new(config)?),
    };

    Ok(Arc::new(gateway))
}
