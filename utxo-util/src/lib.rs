mod config;
mod constants;
mod dir;
mod log_util;

pub use config::*;
pub use constants::*;
pub use dir::*;
pub use log_util::*;

#[macro_use]
extern crate log;
