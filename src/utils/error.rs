use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    SheetError(#[from] calamine::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("DNS resolution error: {0}")]
    DnsError(#[from] hickory_resolver::error::ResolveError),

    #[error("SMTP transport error: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),

    #[error("Message build error: {0}")]
    MessageError(#[from] lettre::error::Error),

    #[error("Invalid address: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error for {field}: {reason} (got: {value})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl OutreachError {
    pub fn config(message: impl Into<String>) -> Self {
        OutreachError::ConfigError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OutreachError>;
