use clap::{Parser, Subcommand};
use utxo_tracker::TrackerConfig;
use utxo_util::GatewayBackend;

#[derive(Parser)]
#[command(name = "utxo-tracker-cli")]
#[command(about = "Query unspent outputs and broadcast signed transactions")]
pub struct Cli {
    /// Use the test network
    #[arg(long, default_value_t = false)]
    pub testnet: bool,

    /// Gateway backend, blockr or electrs
    #[arg(short, long, value_name = "BACKEND")]
    pub backend: Option<GatewayBackend>,

    /// Gateway url, overrides the configured one for the selected backend
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List unspent outputs of an address
    Utxo {
        #[arg(value_name = "ADDRESS")]
        address: String,
    },

    /// Sum of unspent outputs of an address
    Balance {
        #[arg(value_name = "ADDRESS")]
        address: String,
    },

    /// Broadcast a signed transaction given as hex
    Send {
        #[arg(value_name = "RAW_TX_HEX")]
        raw_tx: String,

        /// Addresses to load into the cache first, to report which outputs got spent
        #[arg(long = "from", value_name = "ADDRESS", num_args = 1..)]
        from: Vec<String>,
    },
}

impl Cli {
    // Command line options win over the config file
    pub fn apply(&self, config: &mut TrackerConfig) {
        if self.testnet {
            config.gateway.testnet = true;
        }

        if let Some(backend) = self.backend {
            config.gateway.backend = backend;
        }

        if let Some(ref url) = self.url {
            match config.gateway.backend {
                GatewayBackend::Blockr => config.gateway.blockr_url = Some(url.clone()),
                GatewayBackend::Electrs => config.gateway.electrs_url = Some(url.clone()),
            }
        }
    }
}
