pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::core::{dispatch::Dispatcher, engine::OutreachEngine};
pub use config::{CliConfig, SmtpConfig};
pub use utils::error::{OutreachError, Result};
