//! Outgoing mail over lettre's async SMTP transport: one HTML message per
//! contact with the résumé PDF attached.

use crate::config::{SmtpConfig, TlsMode};
use crate::domain::model::Contact;
use crate::domain::ports::Mailer;
use crate::utils::error::{OutreachError, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::Path;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    resume: Vec<u8>,
    resume_name: String,
    resume_type: ContentType,
}

impl SmtpMailer {
    /// Builds the transport and reads the résumé once up front, so a missing
    /// attachment is a startup error rather than a failure on every send.
    pub fn new(config: &SmtpConfig, resume_path: &Path) -> Result<Self> {
        let builder = match config.tls {
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
            TlsMode::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            }
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        };
        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();

        let sender = Mailbox::new(config.sender_name.clone(), config.user.parse()?);

        let resume = std::fs::read(resume_path).map_err(|e| {
            OutreachError::config(format!(
                "Cannot read resume at {}: {}",
                resume_path.display(),
                e
            ))
        })?;
        let resume_name = resume_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("resume.pdf")
            .to_string();
        let resume_type = ContentType::parse("application/pdf")
            .map_err(|e| OutreachError::config(format!("Bad attachment content type: {}", e)))?;

        Ok(Self {
            transport,
            sender,
            resume,
            resume_name,
            resume_type,
        })
    }

    fn message_for(&self, contact: &Contact) -> Result<Message> {
        let attachment = Attachment::new(self.resume_name.clone())
            .body(self.resume.clone(), self.resume_type.clone());

        let message = Message::builder()
            .from(self.sender.clone())
            .to(contact.hr_email.parse()?)
            .subject(subject(&contact.company))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::html(body_html(
                        &contact.hr_name,
                        &contact.company,
                        &self.sender,
                    )))
                    .singlepart(attachment),
            )?;
        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, contact: &Contact) -> Result<String> {
        let message = self.message_for(contact)?;
        let response = self.transport.send(message).await?;
        Ok(response.message().collect::<Vec<&str>>().join(" "))
    }
}

pub fn subject(company: &str) -> String {
    format!("Software Opportunity Inquiry at {}", company)
}

pub fn body_html(hr_name: &str, company: &str, sender: &Mailbox) -> String {
    let sender_name = sender
        .name
        .clone()
        .unwrap_or_else(|| sender.email.to_string());
    format!(
        "<p>Dear <span style=\"font-weight:bold;\">{hr_name}</span>,</p>\n\
         <p>I'm very interested in software engineering opportunities (internships or full-time) \
         at <span style=\"font-weight:bold;\">{company}</span>.</p>\n\
         <p>My resume is attached for your review. I'd welcome the opportunity to discuss how my \
         skills and experience align with your team's needs.</p>\n\
         <p>Thank you for your time.</p>\n\
         <p>Best regards,<br>\n\
         <span style=\"font-weight:bold;\">{sender_name}</span><br>\n\
         {sender_email}</p>",
        sender_email = sender.email
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_config() -> SmtpConfig {
        SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            user: "sender@example.com".to_string(),
            pass: "secret".to_string(),
            tls: TlsMode::None,
            sender_name: Some("Test Sender".to_string()),
        }
    }

    fn test_mailer() -> (SmtpMailer, tempfile::NamedTempFile) {
        let mut resume = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        resume.write_all(b"%PDF-1.4 fake resume").unwrap();
        resume.flush().unwrap();
        let mailer = SmtpMailer::new(&test_config(), resume.path()).unwrap();
        (mailer, resume)
    }

    #[test]
    fn subject_names_the_company() {
        assert_eq!(
            subject("Acme"),
            "Software Opportunity Inquiry at Acme"
        );
    }

    #[test]
    fn body_greets_hr_and_mentions_company() {
        let sender = Mailbox::new(
            Some("Jo Doe".to_string()),
            "jo@example.com".parse().unwrap(),
        );
        let body = body_html("Alice", "Acme", &sender);
        assert!(body.contains("Dear <span style=\"font-weight:bold;\">Alice</span>"));
        assert!(body.contains("Acme"));
        assert!(body.contains("Jo Doe"));
        assert!(body.contains("jo@example.com"));
    }

    #[test]
    fn body_falls_back_to_address_without_display_name() {
        let sender = Mailbox::new(None, "jo@example.com".parse().unwrap());
        let body = body_html("HR", "Acme", &sender);
        assert!(body.contains("<span style=\"font-weight:bold;\">jo@example.com</span>"));
    }

    #[tokio::test]
    async fn builds_a_multipart_message_with_attachment() {
        let (mailer, _resume) = test_mailer();
        let contact = Contact {
            company: "Acme".to_string(),
            hr_name: "Alice".to_string(),
            hr_email: "alice@acme.example".to_string(),
        };

        let message = mailer.message_for(&contact).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(raw.contains("Software Opportunity Inquiry at Acme"));
        assert!(raw.contains("alice@acme.example"));
        assert!(raw.contains("application/pdf"));
    }

    #[tokio::test]
    async fn invalid_recipient_is_a_message_error() {
        let (mailer, _resume) = test_mailer();
        let contact = Contact {
            company: "Acme".to_string(),
            hr_name: "Alice".to_string(),
            hr_email: "not an address".to_string(),
        };

        assert!(mailer.message_for(&contact).is_err());
    }

    #[tokio::test]
    async fn missing_resume_is_a_startup_error() {
        let result = SmtpMailer::new(&test_config(), Path::new("no-such-resume.pdf"));
        assert!(result.is_err());
    }
}
