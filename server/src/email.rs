//! Booking notification emails (SMTP)
//!
//! Best-effort, fire-and-forget: the handler spawns `notify` after the
//! ledger commit, and any failure here is logged and swallowed. A booking
//! never fails or rolls back because mail could not be sent.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::ledger::{Booking, PaymentMethod};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SMTP notifier for confirmed bookings
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    operator: Mailbox,
}

impl Mailer {
    pub fn new(smtp: &SmtpConfig) -> Result<Self, BoxError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.server)?
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: smtp.from.parse()?,
            operator: smtp.operator.parse()?,
        })
    }

    /// Send the customer confirmation and the operator alert.
    ///
    /// Each failure is logged on its own; one failing never stops the other.
    pub async fn notify(&self, booking: &Booking) {
        if let Err(e) = self.send_confirmation(booking).await {
            tracing::warn!(
                booking_number = booking.booking_number,
                error = %e,
                "Failed to send confirmation email"
            );
        }
        if let Err(e) = self.send_operator_alert(booking).await {
            tracing::warn!(
                booking_number = booking.booking_number,
                error = %e,
                "Failed to send operator alert email"
            );
        }
    }

    async fn send_confirmation(&self, booking: &Booking) -> Result<(), BoxError> {
        let body = format!(
            "Dear {},\n\n\
             Your sauna booking is confirmed.\n\n\
             Booking number: {}\n\
             Session: {} {}\n\
             Party size: {}\n\
             Payment: {}\n\n\
             See you there!",
            booking.name,
            booking.booking_number,
            booking.day,
            booking.time,
            booking.people,
            payment_label(booking.payment),
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(booking.email.parse()?)
            .subject(format!("Sauna booking #{} confirmed", booking.booking_number))
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.transport.send(message).await?;
        tracing::info!(
            booking_number = booking.booking_number,
            to = %booking.email,
            "Confirmation email sent"
        );
        Ok(())
    }

    async fn send_operator_alert(&self, booking: &Booking) -> Result<(), BoxError> {
        let body = format!(
            "New booking #{}\n\n\
             Session: {} {}\n\
             Party size: {}\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Payment: {}",
            booking.booking_number,
            booking.day,
            booking.time,
            booking.people,
            booking.name,
            booking.email,
            booking.phone.as_deref().unwrap_or("-"),
            payment_label(booking.payment),
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.operator.clone())
            .subject(format!(
                "New sauna booking #{} ({} {})",
                booking.booking_number, booking.day, booking.time
            ))
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.transport.send(message).await?;
        Ok(())
    }
}

fn payment_label(payment: PaymentMethod) -> &'static str {
    match payment {
        PaymentMethod::Cash => "cash on arrival",
        PaymentMethod::Card => "card (online)",
    }
}
