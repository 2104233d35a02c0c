pub mod smtp;

pub use smtp::{SmtpConfig, TlsMode};

use crate::core::dispatch::DEFAULT_CONCURRENCY;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_positive_number, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "outreach")]
#[command(about = "Sends a templated resume email to every HR contact in a spreadsheet")]
pub struct CliConfig {
    /// Spreadsheet of HR contacts (.csv, .xlsx, or .xls; first sheet only)
    #[arg(long, default_value = "contacts.xlsx")]
    pub input: String,

    /// PDF attached verbatim to every outgoing message
    #[arg(long, default_value = "resume.pdf")]
    pub resume: String,

    /// Maximum contacts simultaneously in the check-or-send phase
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_file_extension("input", &self.input, &["csv", "xlsx", "xls"])?;
        validate_path("resume", &self.resume)?;
        validate_positive_number("concurrency", self.concurrency, 1)?;
        Ok(())
    }
}
