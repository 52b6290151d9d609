//! Outbound Email
//!
//! Rendering is the caller's job; this module only delivers a finished
//! plain-text + HTML message over an SMTP relay.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::SmtpConfig;

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Mail delivery port
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver a single message
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// SMTP implementation (STARTTLS relay)
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        let from = self
            .from_address
            .parse()
            .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?;
        let to = mail
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(mail.to.clone()))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(mail.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(mail.html_body.clone()),
                    ),
            )?;

        Ok(message)
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = self.build_message(mail)?;
        self.transport.send(message).await?;

        tracing::info!(subject = %mail.subject, "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn mailer(from: &str) -> SmtpMailer {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "noreply@example.com".to_string(),
            password: SecretString::from("app-password".to_string()),
            from_address: from.to_string(),
        };
        SmtpMailer::new(&config).unwrap()
    }

    fn mail(to: &str) -> OutgoingMail {
        OutgoingMail {
            to: to.to_string(),
            subject: "Your OTP for Login".to_string(),
            text_body: "Your code is 123456".to_string(),
            html_body: "<p>Your code is <b>123456</b></p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_starttls_transport_builds_with_rustls() {
        let config = SmtpConfig {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: "noreply@example.com".to_string(),
            password: SecretString::from("app-password".to_string()),
            from_address: "noreply@example.com".to_string(),
        };
        assert!(SmtpMailer::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_build_message_has_both_parts() {
        let message = mailer("noreply@example.com")
            .build_message(&mail("seller@example.com"))
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Your OTP for Login"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_rejected() {
        let err = mailer("noreply@example.com")
            .build_message(&mail("not an address"))
            .unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(addr) if addr == "not an address"));
    }

    #[tokio::test]
    async fn test_invalid_sender_is_rejected() {
        let err = mailer("broken")
            .build_message(&mail("seller@example.com"))
            .unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(_)));
    }
}
