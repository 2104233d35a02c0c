pub mod deliver;
pub mod dispatch;
pub mod engine;
pub mod extract;
pub mod table;

pub use crate::domain::model::{Contact, Outcome, OutcomeCounts, RunSummary, SheetRow};
pub use crate::domain::ports::{Mailer, MxResolver};
pub use crate::utils::error::Result;
