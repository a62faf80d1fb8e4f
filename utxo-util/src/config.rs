use crate::constants::{
    BLOCKR_MAINNET_NETWORK_ID, BLOCKR_TESTNET_NETWORK_ID, ELECTRS_MAINNET_RPC_URL,
    ELECTRS_TESTNET_RPC_URL,
};
use bitcoin::Network;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayBackend {
    // REST index + push api in the blockr.io style
    #[default]
    Blockr,

    // Electrum protocol server, e.g. electrs
    Electrs,
}

impl fmt::Display for GatewayBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayBackend::Blockr => write!(f, "blockr"),
            GatewayBackend::Electrs => write!(f, "electrs"),
        }
    }
}

impl FromStr for GatewayBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blockr" => Ok(GatewayBackend::Blockr),
            "electrs" | "electrum" => Ok(GatewayBackend::Electrs),
            _ => {
                let msg = format!("Unknown gateway backend: {}", s);
                error!("{}", msg);
                Err(msg)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    // Selects the test network instead of the production one
    #[serde(default)]
    pub testnet: bool,

    #[serde(default)]
    pub backend: GatewayBackend,

    #[serde(default)]
    pub blockr_url: Option<String>,

    #[serde(default)]
    pub electrs_url: Option<String>,

    // HTTP request timeout, none means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl GatewayConfig {
    pub fn network(&self) -> Network {
        if self.testnet {
            Network::Testnet
        } else {
            Network::Bitcoin
        }
    }

    pub fn network_id(&self) -> &'static str {
        if self.testnet {
            BLOCKR_TESTNET_NETWORK_ID
        } else {
            BLOCKR_MAINNET_NETWORK_ID
        }
    }

    pub fn blockr_url(&self) -> String {
        if let Some(ref url) = self.blockr_url {
            url.trim_end_matches('/').to_string()
        } else {
            format!("http://{}.blockr.io", self.network_id())
        }
    }

    pub fn electrs_url(&self) -> String {
        if let Some(ref url) = self.electrs_url {
            url.clone()
        } else if self.testnet {
            ELECTRS_TESTNET_RPC_URL.to_string()
        } else {
            ELECTRS_MAINNET_RPC_URL.to_string()
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            testnet: false,
            backend: GatewayBackend::default(),
            blockr_url: None,
            electrs_url: None,
            timeout_secs: None,
        }
    }
}
