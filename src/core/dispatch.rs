//! Bounded-concurrency send loop.
//!
//! Every contact becomes one task; a semaphore caps how many are in the
//! deliverability-check-or-send phase at once, and freed slots are handed to
//! queued contacts immediately. Tasks report `(company, outcome)` over a
//! channel to a single aggregator that owns the counters, so no counter state
//! is ever shared between tasks.

use crate::core::deliver::DeliverabilityChecker;
use crate::domain::model::{Contact, Outcome, RunSummary};
use crate::domain::ports::{Mailer, MxResolver};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

pub const DEFAULT_CONCURRENCY: usize = 20;

pub struct Dispatcher<M, R>
where
    M: Mailer + 'static,
    R: MxResolver + 'static,
{
    mailer: Arc<M>,
    checker: Arc<DeliverabilityChecker<R>>,
    concurrency: usize,
}

impl<M, R> Dispatcher<M, R>
where
    M: Mailer + 'static,
    R: MxResolver + 'static,
{
    pub fn new(mailer: M, checker: DeliverabilityChecker<R>, concurrency: usize) -> Self {
        Self {
            mailer: Arc::new(mailer),
            checker: Arc::new(checker),
            concurrency: concurrency.max(1),
        }
    }

    /// Processes every contact to a terminal outcome and returns the final
    /// counters. One contact's failure never aborts another; the call returns
    /// only after all tasks have finished.
    pub async fn run(&self, contacts: Vec<Contact>) -> RunSummary {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for contact in contacts {
            let semaphore = Arc::clone(&semaphore);
            let mailer = Arc::clone(&self.mailer);
            let checker = Arc::clone(&self.checker);
            let tx = tx.clone();

            tasks.spawn(async move {
                // The permit scopes the whole check-or-send phase.
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    // Only possible if the semaphore were closed; it never is.
                    Err(_) => return,
                };
                let outcome = process_contact(checker.as_ref(), mailer.as_ref(), &contact).await;
                let _ = tx.send((contact.company, outcome));
            });
        }
        drop(tx);

        let mut summary = RunSummary::default();
        while let Some((company, outcome)) = rx.recv().await {
            summary.record(&company, outcome);
        }
        while tasks.join_next().await.is_some() {}

        summary
    }
}

async fn process_contact<M: Mailer, R: MxResolver>(
    checker: &DeliverabilityChecker<R>,
    mailer: &M,
    contact: &Contact,
) -> Outcome {
    tracing::info!(
        "Sending email to {} at {} for {}",
        contact.hr_name,
        contact.hr_email,
        contact.company
    );

    if !checker.check(&contact.hr_email).await {
        tracing::warn!(
            "Skipping send to {} ({}): failed deliverability check",
            contact.hr_email,
            contact.company
        );
        return Outcome::Undeliverable;
    }

    match mailer.send(contact).await {
        Ok(id) => {
            tracing::info!("Email sent to {}: {}", contact.hr_email, id);
            Outcome::Sent
        }
        Err(e) => {
            tracing::error!("Error sending email to {}: {}", contact.hr_email, e);
            Outcome::SendFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{OutreachError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct AlwaysMx;

    #[async_trait]
    impl MxResolver for AlwaysMx {
        async fn has_mx(&self, _domain: &str) -> Result<bool> {
            Ok(true)
        }
    }

    struct NoMxForDomain(&'static str);

    #[async_trait]
    impl MxResolver for NoMxForDomain {
        async fn has_mx(&self, domain: &str) -> Result<bool> {
            Ok(domain != self.0)
        }
    }

    /// Succeeds unless the recipient's local part is "bounce", and tracks the
    /// maximum number of sends in flight at any instant.
    struct TrackingMailer {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        sent: AtomicUsize,
    }

    impl TrackingMailer {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                sent: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Mailer for TrackingMailer {
        async fn send(&self, contact: &Contact) -> Result<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if contact.hr_email.starts_with("bounce@") {
                return Err(OutreachError::config("mailbox rejected"));
            }
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(format!("<msg-{}>", contact.hr_email))
        }
    }

    fn contact(company: &str, email: &str) -> Contact {
        Contact {
            company: company.to_string(),
            hr_name: "HR".to_string(),
            hr_email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn counters_balance_globally_and_per_company() {
        let contacts = vec![
            contact("Acme", "a@x.com"),
            contact("Acme", "bounce@x.com"),
            contact("Globex", "hr@dead.example"),
            contact("Globex", "b@y.com"),
        ];

        let dispatcher = Dispatcher::new(
            TrackingMailer::new(),
            DeliverabilityChecker::new(NoMxForDomain("dead.example")),
            4,
        );
        let summary = dispatcher.run(contacts).await;

        assert_eq!(summary.totals.attempts, 4);
        assert_eq!(summary.totals.successes, 2);
        assert_eq!(summary.totals.failures, 2);
        assert_eq!(
            summary.totals.attempts,
            summary.totals.successes + summary.totals.failures
        );
        for counts in summary.companies.values() {
            assert_eq!(counts.attempts, counts.successes + counts.failures);
        }
        assert_eq!(summary.companies["Acme"].successes, 1);
        assert_eq!(summary.companies["Acme"].failures, 1);
        assert_eq!(summary.companies["Globex"].successes, 1);
        assert_eq!(summary.companies["Globex"].failures, 1);
    }

    #[tokio::test]
    async fn concurrency_stays_under_the_bound() {
        let contacts: Vec<Contact> = (0..50)
            .map(|i| contact(&format!("Company {}", i % 7), &format!("hr{}@x.com", i)))
            .collect();

        let dispatcher = Dispatcher::new(
            TrackingMailer::new(),
            DeliverabilityChecker::new(AlwaysMx),
            20,
        );
        let summary = dispatcher.run(contacts).await;

        assert_eq!(summary.totals.attempts, 50);
        assert_eq!(summary.totals.successes, 50);
        let peak = dispatcher.mailer.peak.load(Ordering::SeqCst);
        assert!(peak <= 20, "peak in-flight sends was {}", peak);
        // Work-conserving: with 50 tasks the pool should actually fill up.
        assert!(peak > 1, "sends never overlapped");
    }

    #[tokio::test]
    async fn failures_do_not_abandon_other_contacts() {
        let contacts: Vec<Contact> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    contact("Acme", &format!("bounce@x{}.com", i))
                } else {
                    contact("Acme", &format!("hr@x{}.com", i))
                }
            })
            .collect();

        let dispatcher =
            Dispatcher::new(TrackingMailer::new(), DeliverabilityChecker::new(AlwaysMx), 3);
        let summary = dispatcher.run(contacts).await;

        assert_eq!(summary.totals.attempts, 10);
        assert_eq!(summary.totals.successes, 5);
        assert_eq!(summary.totals.failures, 5);
        assert_eq!(dispatcher.mailer.sent.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn empty_contact_list_yields_empty_summary() {
        let dispatcher = Dispatcher::new(
            TrackingMailer::new(),
            DeliverabilityChecker::new(AlwaysMx),
            DEFAULT_CONCURRENCY,
        );
        let summary = dispatcher.run(Vec::new()).await;

        assert_eq!(summary.totals, Default::default());
        assert_eq!(summary.companies_tried(), 0);
    }

    #[tokio::test]
    async fn undeliverable_contacts_never_reach_the_mailer() {
        let contacts = vec![contact("Acme", "hr@dead.example")];

        let dispatcher = Dispatcher::new(
            TrackingMailer::new(),
            DeliverabilityChecker::new(NoMxForDomain("dead.example")),
            1,
        );
        let summary = dispatcher.run(contacts).await;

        assert_eq!(summary.totals.failures, 1);
        assert_eq!(dispatcher.mailer.sent.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.mailer.peak.load(Ordering::SeqCst), 0);
    }
}
