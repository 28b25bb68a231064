//! Shared application state

use crate::calendar::SlotCalendar;
use crate::config::Config;
use crate::email::Mailer;
use crate::ledger::{BookingLedger, BookingStorage};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    /// Availability ledger (persisted bookings + published calendar)
    pub ledger: BookingLedger,
    /// Stripe secret key
    pub stripe_secret_key: String,
    /// Redirect target after completed checkout
    pub success_url: String,
    /// Redirect target after cancelled checkout
    pub cancel_url: String,
    /// ISO currency code passed to the payment provider
    pub currency: String,
    /// Price per person in the provider's smallest currency unit
    pub price_per_person: u64,
    /// Booking notifier; None when SMTP is not configured
    pub mailer: Option<Mailer>,
}

impl AppState {
    /// Create a new AppState: open the store and wire up the notifier
    pub fn new(config: &Config) -> Result<Self, BoxError> {
        std::fs::create_dir_all(&config.data_dir)?;
        let store_path = std::path::Path::new(&config.data_dir).join("bookings.redb");
        let storage = BookingStorage::open(&store_path)?;
        tracing::info!(path = %store_path.display(), "Booking store opened");

        let calendar = SlotCalendar::new(
            config.booking_days.clone(),
            config.booking_times.clone(),
            config.slot_capacity,
        );

        let mailer = match &config.smtp {
            Some(smtp) => Some(Mailer::new(smtp)?),
            None => {
                tracing::warn!(
                    "SMTP not configured; booking notification emails are disabled. \
                     Set SMTP_SERVER, SMTP_USERNAME, SMTP_PASSWORD to enable."
                );
                None
            }
        };

        Ok(Self {
            ledger: BookingLedger::new(storage, calendar),
            stripe_secret_key: config.stripe_secret_key.clone(),
            success_url: config.success_url.clone(),
            cancel_url: config.cancel_url.clone(),
            currency: config.currency.clone(),
            price_per_person: config.price_per_person,
            mailer,
        })
    }

    /// Canonical checkout amount for a party, in the provider's smallest
    /// currency unit. Never divided or rescaled downstream.
    pub fn checkout_amount(&self, people: u32) -> u64 {
        u64::from(people) * self.price_per_person
    }
}
