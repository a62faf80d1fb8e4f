mod utxo;

pub use utxo::*;
