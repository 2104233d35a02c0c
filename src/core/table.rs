//! Flattens raw sheet rows into the ordered contact list.

use crate::core::extract::{extract_emails, extract_names};
use crate::domain::model::{Contact, SheetRow, COMPANY_PLACEHOLDER, HR_NAME_PLACEHOLDER};

pub const COMPANY_COLUMN: &str = "Company";
pub const HR_NAME_COLUMN: &str = "Name of HR's";
pub const HR_EMAIL_COLUMN: &str = "HR Email id";

/// Builds one [`Contact`] per extracted email address, in row order and then
/// within-row extraction order.
///
/// Rows without an email cell are skipped with a warning. Names are zipped
/// with emails positionally; when a row lists fewer names than addresses the
/// tail is padded with the `"HR"` placeholder.
pub fn build_contacts(rows: &[SheetRow]) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let company = row
            .field(COMPANY_COLUMN)
            .unwrap_or(COMPANY_PLACEHOLDER)
            .to_string();

        let Some(emails_raw) = row.field(HR_EMAIL_COLUMN) else {
            tracing::warn!(
                "Skipping row {} (no {} cell): {:?}",
                index + 1,
                HR_EMAIL_COLUMN,
                row.fields
            );
            continue;
        };

        let emails = extract_emails(emails_raw);
        if emails.is_empty() {
            tracing::warn!(
                "Skipping row {} ({} cell has no valid address): {:?}",
                index + 1,
                HR_EMAIL_COLUMN,
                emails_raw
            );
            continue;
        }

        let mut names = extract_names(row.field(HR_NAME_COLUMN).unwrap_or(""));
        while names.len() < emails.len() {
            names.push(HR_NAME_PLACEHOLDER.to_string());
        }

        for (email, name) in emails.into_iter().zip(names) {
            contacts.push(Contact {
                company: company.clone(),
                hr_name: if name.is_empty() {
                    HR_NAME_PLACEHOLDER.to_string()
                } else {
                    name
                },
                hr_email: email,
            });
        }
    }

    contacts
}
