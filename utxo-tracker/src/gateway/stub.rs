use super::IndexGateway;
use crate::error::TrackerError;
use crate::types::UnspentOutput;
use bitcoin::Txid;
use bitcoin::hashes::Hash;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

// Scripted gateway for unit tests, counts every call it receives
pub struct StubGateway {
    unspent: Mutex<HashMap<String, Vec<UnspentOutput>>>,
    broadcast_result: Mutex<Result<Txid, TrackerError>>,
    pub broadcasted: Mutex<Vec<Vec<u8>>>,
    pub query_count: AtomicUsize,
    pub broadcast_count: AtomicUsize,
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            unspent: Mutex::new(HashMap::new()),
            broadcast_result: Mutex::new(Ok(Txid::all_zeros())),
            broadcasted: Mutex::new(Vec::new()),
            query_count: AtomicUsize::new(0),
            broadcast_count: AtomicUsize::new(0),
        }
    }

    pub fn with_unspent(self, address: &str, outputs: Vec<UnspentOutput>) -> Self {
        self.unspent
            .lock()
            .unwrap()
            .insert(address.to_string(), outputs);
        self
    }

    pub fn set_unspent(&self, address: &str, outputs: Vec<UnspentOutput>) {
        self.unspent
            .lock()
            .unwrap()
            .insert(address.to_string(), outputs);
    }

    pub fn set_broadcast_result(&self, result: Result<Txid, TrackerError>) {
        *self.broadcast_result.lock().unwrap() = result;
    }

    pub fn queries(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    pub fn broadcasts(&self) -> usize {
        self.broadcast_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IndexGateway for StubGateway {
    fn network_name(&self) -> &str {
        "stub"
    }

    async fn query_unspent(&self, address: &str) -> Result<Vec<UnspentOutput>, TrackerError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);

        self.unspent
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| TrackerError::Rejected(format!("Unknown address {}", address)))
    }

    async fn broadcast(&self, raw_tx: &[u8]) -> Result<Txid, TrackerError> {
        self.broadcast_count.fetch_add(1, Ordering::SeqCst);
        self.broadcasted.lock().unwrap().push(raw_tx.to_vec());

        self.broadcast_result.lock().unwrap().clone()
    }
}
