use crate::core::dispatch::Dispatcher;
use crate::core::table::build_contacts;
use crate::domain::model::{RunSummary, SheetRow};
use crate::domain::ports::{Mailer, MxResolver};

/// Runs the whole pipeline: rows -> contact table -> bounded dispatch.
pub struct OutreachEngine<M, R>
where
    M: Mailer + 'static,
    R: MxResolver + 'static,
{
    dispatcher: Dispatcher<M, R>,
}

impl<M, R> OutreachEngine<M, R>
where
    M: Mailer + 'static,
    R: MxResolver + 'static,
{
    pub fn new(dispatcher: Dispatcher<M, R>) -> Self {
        Self { dispatcher }
    }

    pub async fn run(&self, rows: Vec<SheetRow>) -> RunSummary {
        tracing::info!("Building contact table from {} rows", rows.len());
        let contacts = build_contacts(&rows);
        tracing::info!("Extracted {} contacts", contacts.len());

        let summary = self.dispatcher.run(contacts).await;
        tracing::info!(
            "Dispatch complete: {} attempts, {} successes, {} failures",
            summary.totals.attempts,
            summary.totals.successes,
            summary.totals.failures
        );
        summary
    }
}
