use bitcoin::{OutPoint, PrivateKey, ScriptBuf, Txid};
use serde::{Deserialize, Serialize};

/// One spendable output as reported by the remote index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    /// Hash of the creating transaction, hex in display byte order.
    pub tx: String,

    /// Decimal amount in BTC, as reported by the index.
    pub amount: String,

    /// Output index within the creating transaction.
    pub n: u32,

    #[serde(default)]
    pub confirmations: u32,

    /// Hex encoded locking script.
    pub script: String,
}

impl UnspentOutput {
    pub fn is_output(&self, tx_hash: &str, output_index: u32) -> bool {
        self.n == output_index && self.tx.eq_ignore_ascii_case(tx_hash)
    }
}

/// An output ready to be handed to the transaction builder as a funding input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingReference {
    pub key: PrivateKey,

    // Internal byte order, as it appears in a serialized input
    pub txid: Txid,
    pub vout: u32,

    // Satoshis
    pub value: u64,
    pub script_pubkey: ScriptBuf,
}

impl FundingReference {
    pub fn outpoint(&self) -> OutPoint {
        OutPoint::new(self.txid, self.vout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    pub txid: Txid,

    // Number of cached outputs dropped because the transaction consumes them
    pub marked_spent: usize,
}
