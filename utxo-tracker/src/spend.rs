use crate::cache::UTXOCacheRef;
use crate::error::TrackerError;
use bitcoin::Transaction;
use bitcoin::consensus::encode::serialize;

/// What the tracker needs from a signed transaction.
pub trait SpendingTransaction: Send + Sync {
    /// Outputs consumed by this transaction, as (display order tx hash hex, output index).
    fn spent_outputs(&self) -> Vec<(String, u32)>;

    /// Raw bytes to broadcast.
    fn pack(&self) -> Result<Vec<u8>, TrackerError>;
}

impl SpendingTransaction for Transaction {
    fn spent_outputs(&self) -> Vec<(String, u32)> {
        // Txid displays in reversed (display) order
        self.input
            .iter()
            .map(|txin| {
                (
                    txin.previous_output.txid.to_string(),
                    txin.previous_output.vout,
                )
            })
            .collect()
    }

    // An input count of zero reads back as the segwit marker, so such a tx
    // cannot be relayed
    fn pack(&self) -> Result<Vec<u8>, TrackerError> {
        if self.input.is_empty() {
            let msg = format!("Transaction {} has no inputs", self.compute_txid());
            error!("{}", msg);
            return Err(TrackerError::Encode(msg));
        }

        Ok(serialize(self))
    }
}

pub struct SpendTracker {
    cache: UTXOCacheRef,
}

impl SpendTracker {
    pub fn new(cache: UTXOCacheRef) -> Self {
        Self { cache }
    }

    // Must only be called once the gateway has accepted the transaction
    pub fn mark_spent<T: SpendingTransaction + ?Sized>(&self, tx: &T) -> usize {
        let mut removed = 0;
        for (tx_hash, output_index) in tx.spent_outputs() {
            let count = self.cache.remove_output(&tx_hash, output_index);
            if count == 0 {
                debug!("Spent output {}:{} was not cached", tx_hash, output_index);
            }

            removed += count;
        }

        info!("Marked {} cached outputs as spent", removed);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::UTXOCache;
    use crate::types::UnspentOutput;
    use bitcoin::absolute::LockTime;
    use bitcoin::transaction::Version;
    use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, TxIn, TxOut, Txid, Witness};
    use std::str::FromStr;
    use std::sync::Arc;

    const H1: &str = "3dae1de0ab840ebc5f1b27ddc275acf52e7c86117218157986504ac8eaac98e1";
    const H2: &str = "1f93459a31c5cdaf86daff892b29343aca2e85f7bd27761ab155df23423b8223";

    fn utxo(tx: &str, n: u32) -> UnspentOutput {
        UnspentOutput {
            tx: tx.to_string(),
            amount: "0.0001".to_string(),
            n,
            confirmations: 2,
            script: "51".to_string(),
        }
    }

    fn spending_tx(inputs: &[(&str, u32)]) -> Transaction {
        Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: inputs
                .iter()
                .map(|(hash, vout)| TxIn {
                    previous_output: OutPoint::new(Txid::from_str(hash).unwrap(), *vout),
                    script_sig: ScriptBuf::new(),
                    sequence: Sequence::MAX,
                    witness: Witness::new(),
                })
                .collect(),
            output: vec![TxOut {
                value: Amount::from_sat(1000),
                script_pubkey: ScriptBuf::new(),
            }],
        }
    }

    #[test]
    fn test_spent_outputs_use_display_order() {
        let tx = spending_tx(&[(H1, 0), (H2, 5)]);
        assert_eq!(
            tx.spent_outputs(),
            vec![(H1.to_string(), 0), (H2.to_string(), 5)]
        );

        // The wire form carries the reversed hash
        let raw = tx.pack().unwrap();
        let mut wire_hash = hex::decode(H1).unwrap();
        wire_hash.reverse();
        assert_eq!(&raw[5..37], wire_hash.as_slice());
    }

    #[test]
    fn test_pack_without_inputs() {
        let tx = spending_tx(&[]);
        assert!(matches!(tx.pack(), Err(TrackerError::Encode(_))));
    }

    #[test]
    fn test_mark_spent_removes_all_inputs_of_same_address() {
        let cache = Arc::new(UTXOCache::new());
        cache.put("addr_a", vec![utxo(H1, 0), utxo(H1, 1), utxo(H2, 0)]);

        let tracker = SpendTracker::new(cache.clone());
        let removed = tracker.mark_spent(&spending_tx(&[(H1, 0), (H1, 1)]));

        assert_eq!(removed, 2);
        assert_eq!(cache.get("addr_a"), Some(vec![utxo(H2, 0)]));
    }

    #[test]
    fn test_mark_spent_across_addresses() {
        let cache = Arc::new(UTXOCache::new());
        cache.put("addr_a", vec![utxo(H1, 0)]);
        cache.put("addr_b", vec![utxo(H2, 2), utxo(H2, 3)]);

        let tracker = SpendTracker::new(cache.clone());
        let removed = tracker.mark_spent(&spending_tx(&[(H1, 0), (H2, 3)]));

        assert_eq!(removed, 2);
        assert_eq!(cache.get("addr_a"), Some(vec![]));
        assert_eq!(cache.get("addr_b"), Some(vec![utxo(H2, 2)]));
    }

    #[test]
    fn test_mark_spent_matches_index_not_only_hash() {
        let cache = Arc::new(UTXOCache::new());
        cache.put("addr_a", vec![utxo(H1, 0), utxo(H1, 1)]);

        let tracker = SpendTracker::new(cache.clone());
        assert_eq!(tracker.mark_spent(&spending_tx(&[(H1, 1)])), 1);
        assert_eq!(cache.get("addr_a"), Some(vec![utxo(H1, 0)]));
    }
}
