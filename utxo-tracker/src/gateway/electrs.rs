use super::IndexGateway;
use crate::error::TrackerError;
use crate::translate::format_amount;
use crate::types::UnspentOutput;
use bitcoin::address::{Address, NetworkUnchecked};
use bitcoin::{Network, ScriptBuf, Txid};
use electrum_client::{Client, ElectrumApi, ListUnspentRes};
use utxo_util::GatewayConfig;

// Electrum reports mempool outputs at height 0
pub fn calc_confirmations(tip_height: usize, height: usize) -> u32 {
    if height == 0 || height > tip_height {
        0
    } else {
        (tip_height - height + 1) as u32
    }
}

fn to_unspent_output(
    item: &ListUnspentRes,
    script: &ScriptBuf,
    tip_height: usize,
) -> UnspentOutput {
    UnspentOutput {
        tx: item.tx_hash.to_string(),
        amount: format_amount(item.value),
        n: item.tx_pos as u32,
        confirmations: calc_confirmations(tip_height, item.height),
        script: hex::encode(script.as_bytes()),
    }
}

// Electrum reports rejection as a server error, not a transport failure
pub fn map_broadcast_error(e: electrum_client::Error) -> TrackerError {
    let msg = format!("Failed to broadcast transaction: {}", e);
    error!("{}", msg);
    match e {
        electrum_client::Error::Protocol(_) => TrackerError::Rejected(msg),
        _ => TrackerError::Transport(msg),
    }
}

pub struct ElectrsGateway {
    network: Network,
    network_name: String,
    client: Client,
}

impl ElectrsGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, TrackerError> {
        let server_url = config.electrs_url();
        let client = Client::new(&server_url).map_err(|e| {
            let msg = format!("Failed to create Electrs client {}: {}", server_url, e);
            error!("{}", msg);
            TrackerError::Transport(msg)
        })?;

        let network = config.network();
        Ok(Self {
            network,
            network_name: network.to_string(),
            client,
        })
    }

    fn address_script(&self, address: &str) -> Result<ScriptBuf, TrackerError> {
        let addr: Address<NetworkUnchecked> = address.parse().map_err(|e| {
            let msg = format!("Invalid address {}: {}", address, e);
            error!("{}", msg);
            TrackerError::InvalidAddress(msg)
        })?;

        let addr = addr.require_network(self.network).map_err(|e| {
            let msg = format!("Address network mismatch for {}: {}", address, e);
            error!("{}", msg);
            TrackerError::InvalidAddress(msg)
        })?;

        Ok(addr.script_pubkey())
    }

    fn get_tip_height(&self) -> Result<usize, TrackerError> {
        let header = self.client.block_headers_subscribe().map_err(|e| {
            let msg = format!("Failed to get tip header: {}", e);
            error!("{}", msg);
            TrackerError::Transport(msg)
        })?;

        Ok(header.height)
    }
}

#[async_trait::async_trait]
impl IndexGateway for ElectrsGateway {
    fn network_name(&self) -> &str {
        &self.network_name
    }

    async fn query_unspent(&self, address: &str) -> Result<Vec<UnspentOutput>, TrackerError> {
        let script = self.address_script(address)?;

        let list = self.client.script_list_unspent(&script).map_err(|e| {
            let msg = format!("Failed to list unspent for address {}: {}", address, e);
            error!("{}", msg);
            TrackerError::Transport(msg)
        })?;

        let tip_height = self.get_tip_height()?;
        debug!(
            "Got {} unspent outputs for address {} at tip {}",
            list.len(),
            address,
            tip_height
        );

        Ok(list
            .iter()
            .map(|item| to_unspent_output(item, &script, tip_height))
            .collect())
    }

    async fn broadcast(&self, raw_tx: &[u8]) -> Result<Txid, TrackerError> {
        self.client
            .transaction_broadcast_raw(raw_tx)
            .map_err(map_broadcast_error)
    }
}
