//! Email relay for form submissions
//!
//! Submissions are formatted as plain-text messages and sent to the
//! organisers' mailbox. Sending goes through the [`Notifier`] trait so the
//! HTTP layer does not care whether mail is delivered over SMTP or only
//! logged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::{
    Message, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::SmtpTransport,
    transport::smtp::authentication::Credentials,
};
use std::sync::Arc;
use tracing::info;

use crate::config::EmailConfig;
use crate::registration::{Booking, BookingEntry, MatchRegistration, RegisterType, TurfRegistration};
use crate::{Result, TurfbookError};

/// A plain-text email ready to be relayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<()>;
}

/// Build the notifier described by the email configuration
pub fn notifier_from_config(config: &EmailConfig) -> Result<Arc<dyn Notifier>> {
    if config.enabled {
        Ok(Arc::new(SmtpNotifier::from_config(config)?))
    } else {
        info!("Email relay disabled, notifications will only be logged");
        Ok(Arc::new(LogNotifier))
    }
}

/// Sends notifications through an authenticated SMTP relay
pub struct SmtpNotifier {
    mailer: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        let (Some(username), Some(password)) = (&config.username, &config.password) else {
            return Err(TurfbookError::config(
                "Email username and password are required when email is enabled",
            ));
        };

        let from = format!("{} <{}>", config.from_name, username)
            .parse::<Mailbox>()
            .map_err(|e| TurfbookError::config(format!("Failed to parse from address: {e}")))?;
        let to = config
            .recipient
            .parse::<Mailbox>()
            .map_err(|e| TurfbookError::config(format!("Failed to parse to address: {e}")))?;

        let credentials = Credentials::new(username.clone(), password.clone());
        let mailer = SmtpTransport::relay(&config.smtp_relay)
            .map_err(|e| TurfbookError::config(format!("Invalid SMTP relay: {e}")))?
            .credentials(credentials)
            .build();

        Ok(Self { mailer, from, to })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body)
            .map_err(|e| TurfbookError::notification(format!("Failed to build email: {e}")))?;

        let mailer = self.mailer.clone();
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| TurfbookError::notification(format!("Mail task failed: {e}")))?
            .map_err(|e| TurfbookError::notification(format!("Failed to send email: {e}")))?;

        info!(subject = %notification.subject, "Sent notification email to {}", self.to);
        Ok(())
    }
}

/// Logs notifications instead of sending them
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        info!(
            subject = %notification.subject,
            "Email relay disabled, notification body:\n{}",
            notification.body
        );
        Ok(())
    }
}

/// Message for a unified match registration
#[must_use]
pub fn registration_notification(
    registration: &MatchRegistration,
    submitted_at: DateTime<Utc>,
) -> Notification {
    let team_line = if registration.register_type == RegisterType::Team {
        format!(
            "Team Name: {}\n",
            registration.your_name.as_deref().unwrap_or("-")
        )
    } else {
        String::new()
    };

    let body = format!(
        "New Match Registration Received\n\n\
Register Type: {}\n\
{}\n\
Full Name: {}\n\
Email: {}\n\
WhatsApp: {}\n\
Sport: {}\n\
Player Type: {}\n\
Turf: {}\n\n\
Submitted At: {}\n",
        registration.register_type.name(),
        team_line,
        registration.full_name,
        registration.email,
        registration.whatsapp_number,
        registration.sport,
        registration.player_type.as_deref().unwrap_or("-"),
        registration.turf_name,
        submitted_at.format("%d/%m/%Y, %H:%M:%S UTC")
    );

    Notification {
        subject: "Play Before Retire - New Registration".to_string(),
        body,
    }
}

/// Message for an individual or team booking
#[must_use]
pub fn booking_notification(booking: &Booking) -> Notification {
    let details = match &booking.entry {
        BookingEntry::Individual(individual) => format!(
            "Full Name: {}\n\
Team: {}\n\
Player Type: {}\n\
WhatsApp: {}\n",
            individual.full_name,
            individual.team_name,
            individual.player_type,
            individual.whatsapp_number
        ),
        BookingEntry::Team(team) => {
            let players: String = team
                .roster()
                .into_iter()
                .enumerate()
                .map(|(index, player)| format!("  {}. {}\n", index + 1, player))
                .collect();
            format!(
                "Team: {}\n\
Captain: {}\n\
WhatsApp: {}\n\
Players:\n{}",
                team.team_name, team.captain_name, team.whatsapp_number, players
            )
        }
    };

    let body = format!(
        "New Booking Received\n\n\
User Email: {}\n\
Registration Type: {}\n\
{}",
        booking.user_email,
        booking.entry.category(),
        details
    );

    Notification {
        subject: "New Match Booking - Play Before Retire".to_string(),
        body,
    }
}

/// Message for a new turf listing
#[must_use]
pub fn turf_notification(turf: &TurfRegistration) -> Notification {
    Notification {
        subject: "Play Before Retire - New Turf Registration".to_string(),
        body: format!(
            "New Turf Registration Received\n\n\
Turf Name: {}\n\
Mobile: {}\n\
District: {}\n\
State: {}\n",
            turf.name, turf.mobile, turf.district, turf.state
        ),
    }
}
