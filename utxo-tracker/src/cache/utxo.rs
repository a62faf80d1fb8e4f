use crate::types::UnspentOutput;
use std::collections::HashMap;
use std::sync::Mutex;

// Address -> outputs believed spendable, in gateway response order.
// An entry that exists is authoritative even when empty, and nothing
// here expires: only local spends shrink an entry.
type AddressUTXOMap = HashMap<String, Vec<UnspentOutput>>;

pub struct UTXOCache {
    cache: Mutex<AddressUTXOMap>,
}

impl UTXOCache {
    pub fn new() -> Self {
        let cache = Mutex::new(HashMap::new());

        Self { cache }
    }

    // None is a miss; Some(vec![]) is a cached address with nothing to spend
    pub fn get(&self, address: &str) -> Option<Vec<UnspentOutput>> {
        self.cache.lock().unwrap().get(address).cloned()
    }

    pub fn put(&self, address: &str, outputs: Vec<UnspentOutput>) {
        debug!(
            "Caching {} unspent outputs for address {}",
            outputs.len(),
            address
        );

        self.cache
            .lock()
            .unwrap()
            .insert(address.to_string(), outputs);
    }

    // Installs outputs only when the address is still a miss and returns what the
    // entry holds afterwards. A fetch that lost the race to another caller never
    // replaces an entry that local spends may already have shrunk.
    pub fn get_or_put(&self, address: &str, outputs: Vec<UnspentOutput>) -> Vec<UnspentOutput> {
        let mut cache = self.cache.lock().unwrap();
        if let Some(existing) = cache.get(address) {
            debug!(
                "Address {} already cached with {} outputs, dropping {} fetched",
                address,
                existing.len(),
                outputs.len()
            );
            return existing.clone();
        }

        debug!(
            "Caching {} unspent outputs for address {}",
            outputs.len(),
            address
        );
        cache.insert(address.to_string(), outputs.clone());
        outputs
    }

    // Scans every address, the spending tx may pull inputs from any of them
    pub fn remove_output(&self, tx_hash: &str, output_index: u32) -> usize {
        let mut cache = self.cache.lock().unwrap();

        let mut removed = 0;
        for (address, outputs) in cache.iter_mut() {
            let before = outputs.len();
            outputs.retain(|utxo| !utxo.is_output(tx_hash, output_index));

            let count = before - outputs.len();
            if count > 0 {
                debug!(
                    "Removed spent output {}:{} from address {}",
                    tx_hash, output_index, address
                );
                removed += count;
            }
        }

        removed
    }

    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().unwrap().is_empty()
    }

    pub fn addresses(&self) -> Vec<String> {
        self.cache.lock().unwrap().keys().cloned().collect()
    }
}

impl Default for UTXOCache {
    fn default() -> Self {
        Self::new()
    }
}

pub type UTXOCacheRef = std::sync::Arc<UTXOCache>;
