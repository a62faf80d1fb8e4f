mod cmd;
mod tracker_service;

use clap::Parser;
use cmd::Cli;
use tracker_service::TrackerCliService;
use utxo_tracker::TrackerConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = utxo_util::LogConfig::new(utxo_util::UTXO_TRACKER_CLI_TOOL_NAME)
        .with_level(&cli.log_level)
        .enable_file(false)
        .enable_console(true);

    let _logger = match utxo_util::init_log(log_config) {
        Ok(handle) => handle,
        Err(e) => {
            println!("Failed to init log: {}", e);
            std::process::exit(1);
        }
    };

    let root_dir = utxo_util::get_service_dir(utxo_util::UTXO_TRACKER_SERVICE_NAME);
    let mut config = match TrackerConfig::load(&root_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    cli.apply(&mut config);

    let service = match TrackerCliService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            println!("Failed to create UTXO tracker client: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = service.process_command(cli).await {
        let msg = format!("Error processing command: {}", e);
        println!("{}", msg);
        std::process::exit(1);
    }
}
