use std::collections::HashMap;

/// Company name used when the spreadsheet leaves the column blank.
pub const COMPANY_PLACEHOLDER: &str = "Company Name Not Provided";
/// HR name used when a row lists fewer names than email addresses.
pub const HR_NAME_PLACEHOLDER: &str = "HR";

/// One raw spreadsheet row, keyed by column header.
#[derive(Debug, Clone, Default)]
pub struct SheetRow {
    pub fields: HashMap<String, String>,
}

impl SheetRow {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Looks up a column by header, tolerating headers that carry stray
    /// whitespace (the source sheets have a literal `"HR Email id "` column).
    /// Returns `None` when the cell is missing or blank.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match self.fields.get(name) {
            Some(v) => v,
            None => self
                .fields
                .iter()
                .find(|(k, _)| k.trim() == name)
                .map(|(_, v)| v)?,
        };
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// One outreach target: a single email destined for a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub company: String,
    pub hr_name: String,
    pub hr_email: String,
}

/// Terminal outcome of processing one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The transport accepted the message.
    Sent,
    /// The address failed the deliverability check; nothing was sent.
    Undeliverable,
    /// The transport rejected or errored on the send attempt.
    SendFailed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Sent)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: Outcome) {
        self.attempts += 1;
        if outcome.is_success() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
    }
}

/// Aggregated results of one dispatch run, global and per company.
///
/// Company names are used as-is; spelling variants of the same employer count
/// as distinct companies.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub totals: OutcomeCounts,
    pub companies: HashMap<String, OutcomeCounts>,
}

impl RunSummary {
    pub fn record(&mut self, company: &str, outcome: Outcome) {
        self.totals.record(outcome);
        self.companies
            .entry(company.to_string())
            .or_default()
            .record(outcome);
    }

    pub fn companies_tried(&self) -> usize {
        self.companies.len()
    }

    pub fn companies_reached(&self) -> usize {
        self.companies.values().filter(|c| c.successes > 0).count()
    }

    pub fn companies_unreached(&self) -> usize {
        self.companies.values().filter(|c| c.successes == 0).count()
    }

    /// The console report printed once at the end of a run.
    pub fn report(&self) -> String {
        let mut lines = vec!["====== Summary ======".to_string()];
        lines.push(format!("Total email attempts: {}", self.totals.attempts));
        lines.push(format!("Total successes: {}", self.totals.successes));
        lines.push(format!("Total failures: {}", self.totals.failures));
        lines.push(format!("Total companies tried: {}", self.companies_tried()));
        lines.push(format!(
            "Companies applied to (at least one email succeeded): {}",
            self.companies_reached()
        ));
        lines.push(format!(
            "Companies with no successful email: {}",
            self.companies_unreached()
        ));
        lines.join("\n")
    }
}
