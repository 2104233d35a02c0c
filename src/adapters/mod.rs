// Adapters layer: concrete implementations for external systems
// (spreadsheets, DNS, SMTP).

pub mod dns;
pub mod sheet;
pub mod smtp;
