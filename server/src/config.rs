//! Server configuration
//!
//! Everything is environment-supplied with development defaults. The Stripe
//! secret is required outside development; SMTP settings are optional and
//! their absence only disables the notifier.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SMTP settings for the booking notifier
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address, e.g. `Pelikan Szauna <booking@example.com>`
    pub from: String,
    /// Operator mailbox that receives an alert for every booking
    pub operator: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub http_port: u16,
    /// Directory holding the booking store
    pub data_dir: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// Stripe secret key
    pub stripe_secret_key: String,
    /// Redirect target after completed checkout
    pub success_url: String,
    /// Redirect target after cancelled checkout
    pub cancel_url: String,
    /// ISO currency code passed to the payment provider
    pub currency: String,
    /// Price per person, already in the provider's smallest currency unit
    pub price_per_person: u64,
    /// Spots per session slot
    pub slot_capacity: u32,
    /// Bookable days (comma-separated in the environment)
    pub booking_days: Vec<String>,
    /// Bookable times, shared by every day
    pub booking_times: Vec<String>,
    /// SMTP notifier settings; None disables notification
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn env_list(name: &str, default: &str) -> Vec<String> {
        std::env::var(name)
            .unwrap_or_else(|_| default.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let smtp = match (
            std::env::var("SMTP_SERVER").ok().filter(|s| !s.is_empty()),
            std::env::var("SMTP_USERNAME").ok().filter(|s| !s.is_empty()),
            std::env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
        ) {
            (Some(server), Some(username), Some(password)) => {
                let from = std::env::var("EMAIL_FROM").unwrap_or_else(|_| username.clone());
                Some(SmtpConfig {
                    server,
                    port: std::env::var("SMTP_PORT")
                        .ok()
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(587),
                    username,
                    password,
                    operator: std::env::var("OPERATOR_EMAIL").unwrap_or_else(|_| from.clone()),
                    from,
                })
            }
            _ => None,
        };

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "data".into()),
            stripe_secret_key: Self::require_secret("STRIPE_SECRET_KEY", &environment)?,
            success_url: std::env::var("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|_| "https://pelikanszauna.onrender.com/success.html".into()),
            cancel_url: std::env::var("CHECKOUT_CANCEL_URL")
                .unwrap_or_else(|_| "https://pelikanszauna.onrender.com/cancel.html".into()),
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "huf".into()),
            price_per_person: std::env::var("PRICE_PER_PERSON")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(2500),
            slot_capacity: std::env::var("SLOT_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6),
            booking_days: Self::env_list("BOOKING_DAYS", "2026-02-01,2026-02-02,2026-02-03"),
            booking_times: Self::env_list("BOOKING_TIMES", "10:00,11:30,13:00"),
            smtp,
            environment,
        })
    }
}
