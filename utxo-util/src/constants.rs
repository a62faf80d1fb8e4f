
// Service names
pub const UTXO_TRACKER_SERVICE_NAME: &str = "utxo-tracker";
pub const UTXO_TRACKER_CLI_TOOL_NAME: &str = "utxo-tracker-cli";

// Directory constants
pub const UTXO_TRACKER_ROOT_DIR: &str = ".utxo-tracker";

// Gateway endpoints
pub const BLOCKR_MAINNET_NETWORK_ID: &str = "btc";
pub const BLOCKR_TESTNET_NETWORK_ID: &str = "tbtc";
pub const ELECTRS_MAINNET_RPC_URL: &str = "tcp://127.0.0.1:50001";
pub const ELECTRS_TESTNET_RPC_URL: &str = "tcp://127.0.0.1:60001";
