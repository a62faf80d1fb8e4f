use crate::cache::{UTXOCache, UTXOCacheRef};
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::gateway::{IndexGatewayRef, create_gateway};
use crate::spend::{SpendTracker, SpendingTransaction};
use crate::translate::to_funding;
use crate::types::{FundingReference, SendResult, UnspentOutput};
use bitcoin::PrivateKey;
use std::sync::Arc;

pub struct UTXOService {
    gateway: IndexGatewayRef,
    cache: UTXOCacheRef,
    tracker: SpendTracker,
}

impl UTXOService {
    pub fn new(gateway: IndexGatewayRef, cache: UTXOCacheRef) -> Self {
        let tracker = SpendTracker::new(cache.clone());

        Self {
            gateway,
            cache,
            tracker,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let gateway = create_gateway(&config.gateway)?;
        let cache = Arc::new(UTXOCache::new());

        Ok(Self::new(gateway, cache))
    }

    pub fn cache(&self) -> &UTXOCacheRef {
        &self.cache
    }

    pub fn network_name(&self) -> &str {
        self.gateway.network_name()
    }

    // A cached entry is returned as is, even when empty.
    // The cache lock is not held across the gateway call, so a concurrent caller
    // may install the entry first; its entry wins over this fetch.
    pub async fn get_utxo(&self, address: &str) -> Result<Vec<UnspentOutput>, TrackerError> {
        if let Some(outputs) = self.cache.get(address) {
            debug!(
                "Cache hit for address {}: {} outputs",
                address,
                outputs.len()
            );
            return Ok(outputs);
        }

        let outputs = self.gateway.query_unspent(address).await?;
        info!(
            "Fetched {} unspent outputs for address {} from {}",
            outputs.len(),
            address,
            self.gateway.network_name()
        );

        Ok(self.cache.get_or_put(address, outputs))
    }

    // The cache is only touched after the gateway accepted the transaction
    pub async fn send_tx<T: SpendingTransaction + ?Sized>(
        &self,
        tx: &T,
    ) -> Result<SendResult, TrackerError> {
        let raw_tx = tx.pack()?;
        debug!("Broadcasting raw transaction: {}", hex::encode(&raw_tx));

        let txid = self.gateway.broadcast(&raw_tx).await?;
        info!("Transaction {} accepted by {}", txid, self.gateway.network_name());

        let marked_spent = self.tracker.mark_spent(tx);
        Ok(SendResult { txid, marked_spent })
    }

    pub async fn get_funding(
        &self,
        address: &str,
        key: &PrivateKey,
    ) -> Result<Vec<FundingReference>, TrackerError> {
        let outputs = self.get_utxo(address).await?;
        to_funding(&outputs, key)
    }
}

pub type UTXOServiceRef = Arc<UTXOService>;
