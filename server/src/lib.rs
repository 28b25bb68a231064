//! Sauna booking server
//!
//! A small booking backend: a static form queries availability and submits
//! bookings; this service owns the persisted booking ledger, rejects
//! overbooking, redirects card payers to hosted Stripe Checkout, and sends
//! best-effort confirmation email.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── config.rs      # env-driven configuration
//! ├── state.rs       # shared AppState
//! ├── error.rs       # AppError + response mapping
//! ├── calendar.rs    # published (day, time) grid
//! ├── ledger/        # availability ledger (redb store + admission)
//! ├── api/           # HTTP routes and handlers
//! ├── stripe.rs      # Checkout Session creation (REST, no SDK)
//! ├── email.rs       # SMTP notifier
//! └── validation.rs  # request field validation
//! ```

pub mod api;
pub mod calendar;
pub mod config;
pub mod email;
pub mod error;
pub mod ledger;
pub mod state;
pub mod stripe;
pub mod validation;

pub use api::create_router;
pub use calendar::SlotCalendar;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use ledger::{Booking, BookingLedger, BookingStorage, LedgerError, PaymentMethod};
pub use state::AppState;
