use crate::domain::model::Contact;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Outgoing mail transport. Implementations format one message per contact
/// and return the transport-assigned identifier on acceptance.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, contact: &Contact) -> Result<String>;
}

/// Mail-exchange record lookup for a bare domain (no local part).
///
/// Returns `Ok(true)` when at least one MX record exists. Resolution failures
/// (NXDOMAIN, timeout, network) surface as `Err`; callers decide whether that
/// is fatal. The deliverability checker treats any `Err` as "not deliverable".
#[async_trait]
pub trait MxResolver: Send + Sync {
    async fn has_mx(&self, domain: &str) -> Result<bool>;
}
