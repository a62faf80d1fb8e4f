use crate::error::TrackerError;
use crate::types::{FundingReference, UnspentOutput};
use bitcoin::hashes::Hash;
use bitcoin::{Amount, Denomination, PrivateKey, ScriptBuf, Txid};

// Satoshis per BTC
pub const UNIT: u64 = 100_000_000;

// Display order hex -> Txid in internal order
pub fn parse_tx_hash(tx_hash: &str) -> Result<Txid, TrackerError> {
    let mut hash = hex::decode(tx_hash).map_err(|e| {
        let msg = format!("Invalid tx hash {}: {}", tx_hash, e);
        error!("{}", msg);
        TrackerError::MalformedRecord(msg)
    })?;
    hash.reverse();

    let hash: [u8; 32] = hash.as_slice().try_into().map_err(|_| {
        let msg = format!("Invalid tx hash length {}: {}", hash.len(), tx_hash);
        error!("{}", msg);
        TrackerError::MalformedRecord(msg)
    })?;

    Ok(Txid::from_byte_array(hash))
}

pub fn parse_script(script: &str) -> Result<ScriptBuf, TrackerError> {
    let script = hex::decode(script).map_err(|e| {
        let msg = format!("Invalid script {}: {}", script, e);
        error!("{}", msg);
        TrackerError::MalformedRecord(msg)
    })?;

    Ok(ScriptBuf::from_bytes(script))
}

// Exact fixed point parsing of a BTC decimal string into satoshis.
// Rejects negative values, exponent notation and more than 8 fractional digits.
pub fn parse_amount(amount: &str) -> Result<u64, TrackerError> {
    let value = Amount::from_str_in(amount.trim(), Denomination::Bitcoin).map_err(|e| {
        let msg = format!("Invalid amount {}: {}", amount, e);
        error!("{}", msg);
        TrackerError::MalformedRecord(msg)
    })?;

    Ok(value.to_sat())
}

pub fn format_amount(sat: u64) -> String {
    Amount::from_sat(sat).to_string_in(Denomination::Bitcoin)
}

pub fn to_funding_reference(
    utxo: &UnspentOutput,
    key: &PrivateKey,
) -> Result<FundingReference, TrackerError> {
    let txid = parse_tx_hash(&utxo.tx)?;
    let script_pubkey = parse_script(&utxo.script)?;
    let value = parse_amount(&utxo.amount)?;

    Ok(FundingReference {
        key: *key,
        txid,
        vout: utxo.n,
        value,
        script_pubkey,
    })
}

// All or nothing: the first malformed record fails the whole batch
pub fn to_funding(
    utxos: &[UnspentOutput],
    key: &PrivateKey,
) -> Result<Vec<FundingReference>, TrackerError> {
    utxos
        .iter()
        .map(|utxo| to_funding_reference(utxo, key))
        .collect()
}
