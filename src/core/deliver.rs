//! Advisory pre-send deliverability check.
//!
//! Filters out addresses that are obviously not worth a send attempt: bad
//! syntax, or a domain with no mail-exchange records. It cannot see full
//! mailboxes, greylisting, or per-address rejection.

use crate::domain::ports::MxResolver;
use regex::Regex;
use std::sync::OnceLock;

// Deliberately permissive; the strict filtering already happened in extraction.
fn syntax_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"))
}

pub struct DeliverabilityChecker<R: MxResolver> {
    resolver: R,
}

impl<R: MxResolver> DeliverabilityChecker<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Returns `true` when the address is syntactically plausible and its
    /// domain currently publishes at least one MX record. Never errors:
    /// resolution failures of any kind count as "not deliverable".
    pub async fn check(&self, email: &str) -> bool {
        if !syntax_re().is_match(email) {
            tracing::warn!("Address failed syntax check: {}", email);
            return false;
        }

        // The syntax gate guarantees exactly the split we need here.
        let domain = match email.rsplit_once('@') {
            Some((_, domain)) => domain,
            None => return false,
        };

        match self.resolver.has_mx(domain).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!("No MX records for domain: {}", domain);
                false
            }
            Err(e) => {
                tracing::warn!("MX lookup failed for {}: {}", domain, e);
                false
            }
        }
    }
}
