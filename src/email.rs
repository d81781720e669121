use anyhow::{Context, Result};
use askama::Template;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, warn};

/// Email configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
}

/// Sign-in email HTML template
#[derive(Template)]
#[template(path = "emails/sign-in.html")]
struct SignInHtmlTemplate {
    sign_in_link: String,
}

/// Sign-in email plain text template
#[derive(Template)]
#[template(path = "emails/sign-in.txt")]
struct SignInTextTemplate {
    sign_in_link: String,
}

/// Send a sign-in email carrying a one-time link.
///
/// Delivery failures are returned to the caller so the login page can tell
/// the user the provider failed, as opposed to a bad address.
pub async fn send_sign_in_email(
    to_email: &str,
    token: &str,
    next: &str,
    config: &EmailConfig,
    base_url: &str,
) -> Result<()> {
    let sign_in_link = format!(
        "{}/auth/confirm?token={}&next={}",
        base_url,
        token,
        urlencoding::encode(next)
    );

    let html_body = SignInHtmlTemplate {
        sign_in_link: sign_in_link.clone(),
    }
    .render()
    .context("Failed to render HTML email template")?;

    let plain_body = SignInTextTemplate { sign_in_link }
        .render()
        .context("Failed to render plain text email template")?;

    let from_mailbox: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
        .parse()
        .context("Failed to parse from email")?;

    let to_mailbox: Mailbox = to_email.parse().context("Failed to parse to email")?;

    let email = Message::builder()
        .from(from_mailbox)
        .to(to_mailbox)
        .subject("Your sign-in link - skillshelf")
        .multipart(
            lettre::message::MultiPart::alternative()
                .singlepart(
                    lettre::message::SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(plain_body),
                )
                .singlepart(
                    lettre::message::SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html_body),
                ),
        )
        .context("Failed to build email message")?;

    // Local dev (MailDev) runs without credentials or TLS
    let mailer = if config.smtp_username.is_empty() && config.smtp_password.is_empty() {
        SmtpTransport::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .build()
    } else {
        let credentials =
            Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        SmtpTransport::relay(&config.smtp_host)
            .context("Failed to create SMTP transport")?
            .port(config.smtp_port)
            .credentials(credentials)
            .build()
    };

    match mailer.send(&email) {
        Ok(_) => {
            info!(to = to_email, "Sign-in email sent");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, to = to_email, "Failed to send sign-in email");
            Err(e).context("Failed to send sign-in email")
        }
    }
}
