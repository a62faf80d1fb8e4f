use super::cmd::{Cli, Commands};
use bitcoin::Transaction;
use bitcoin::consensus::encode::deserialize;
use utxo_tracker::{TrackerConfig, UTXOService, UnspentOutput, format_amount, parse_amount};

pub struct TrackerCliService {
    service: UTXOService,
}

impl TrackerCliService {
    pub fn new(config: &TrackerConfig) -> Result<Self, String> {
        let service = UTXOService::from_config(config).map_err(|e| {
            let msg = format!("Failed to create UTXO service: {}", e);
            log::error!("{}", msg);
            msg
        })?;

        println!("Using {} gateway on {}", config.gateway.backend, service.network_name());
        Ok(Self { service })
    }

    pub async fn process_command(&self, cli: Cli) -> Result<(), String> {
        match cli.command {
            Commands::Utxo { address } => {
                let outputs = self
                    .service
                    .get_utxo(&address)
                    .await
                    .map_err(|e| e.to_string())?;

                println!("\nUnspent outputs for address: {}", address);
                UTXOFormatter::print_outputs(&outputs);
            }
            Commands::Balance { address } => {
                let outputs = self
                    .service
                    .get_utxo(&address)
                    .await
                    .map_err(|e| e.to_string())?;

                let balance = Self::sum_outputs(&outputs)?;
                println!(
                    "Balance of {}: {} sat ({} BTC) in {} outputs",
                    address,
                    UTXOFormatter::format_number(balance),
                    format_amount(balance),
                    outputs.len()
                );
            }
            Commands::Send { raw_tx, from } => {
                let tx = Self::decode_tx(&raw_tx)?;

                for address in &from {
                    self.service
                        .get_utxo(address)
                        .await
                        .map_err(|e| e.to_string())?;
                }

                let result = self.service.send_tx(&tx).await.map_err(|e| e.to_string())?;
                println!("Transaction broadcasted: {}", result.txid);
                println!("Outputs marked as spent: {}", result.marked_spent);

                for address in &from {
                    if let Some(outputs) = self.service.cache().get(address) {
                        println!("\nRemaining outputs for address: {}", address);
                        UTXOFormatter::print_outputs(&outputs);
                    }
                }
            }
        }

        Ok(())
    }

    fn decode_tx(raw_tx: &str) -> Result<Transaction, String> {
        let data = hex::decode(raw_tx.trim()).map_err(|e| {
            let msg = format!("Invalid transaction hex: {}", e);
            log::error!("{}", msg);
            msg
        })?;

        deserialize::<Transaction>(&data).map_err(|e| {
            let msg = format!("Invalid transaction data: {}", e);
            log::error!("{}", msg);
            msg
        })
    }

    fn sum_outputs(outputs: &[UnspentOutput]) -> Result<u64, String> {
        let mut total: u64 = 0;
        for utxo in outputs {
            let value = parse_amount(&utxo.amount).map_err(|e| e.to_string())?;
            total = total.checked_add(value).ok_or_else(|| {
                let msg = "Balance overflow".to_string();
                log::error!("{}", msg);
                msg
            })?;
        }

        Ok(total)
    }
}

struct UTXOFormatter;

impl UTXOFormatter {
    fn print_outputs(outputs: &[UnspentOutput]) {
        if outputs.is_empty() {
            println!("No unspent outputs found.");
            return;
        }

        println!("┌──────────────────────────────────────────────────────────────────────┬────────────────────┬───────────────┐");
        println!("│ Outpoint                                                             │ Amount (BTC)       │ Confirmations │");
        println!("├──────────────────────────────────────────────────────────────────────┼────────────────────┼───────────────┤");

        for utxo in outputs {
            println!(
                "│ {:<68} │ {:>18} │ {:>13} │",
                format!("{}:{}", utxo.tx, utxo.n),
                utxo.amount,
                utxo.confirmations
            );
        }

        println!("└──────────────────────────────────────────────────────────────────────┴────────────────────┴───────────────┘");
    }

    // Add thousand separators for better readability
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();
        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }
        result.chars().rev().collect()
    }
}
