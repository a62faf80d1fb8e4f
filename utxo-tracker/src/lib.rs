mod cache;
mod config;
mod error;
mod gateway;
mod service;
mod spend;
mod translate;
mod types;

#[macro_use]
extern crate log;

pub use cache::*;
pub use config::*;
pub use error::*;
pub use gateway::*;
pub use service::*;
pub use spend::*;
pub use translate::*;
pub use types::*;
