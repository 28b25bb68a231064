//! Booking endpoint
//!
//! Validation happens before the ledger is consulted; the ledger commit is
//! the point of no return. Side effects (Stripe session, notification
//! emails) run after the commit and can fail without affecting the recorded
//! booking — the slot is reserved at admission time, not at payment
//! completion.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::ledger::{Booking, NewBooking, PaymentMethod};
use crate::state::AppState;
use crate::stripe;
use crate::validation::{
    MAX_NAME_LEN, MAX_PHONE_LEN, validate_email, validate_optional_text, validate_people,
    validate_required_text,
};

/// All fields optional at the serde level so a missing field surfaces as a
/// readable `{ "error": ... }` instead of a deserializer rejection.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub people: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub payment: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub booking_number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
}

fn validate_request(req: BookRequest, capacity: u32) -> Result<NewBooking, AppError> {
    let payment = match req.payment.as_deref().map(str::trim) {
        None | Some("") | Some("cash") => PaymentMethod::Cash,
        Some("card") => PaymentMethod::Card,
        Some(other) => {
            return Err(AppError::InvalidRequest(format!(
                "payment must be \"cash\" or \"card\", got \"{other}\""
            )));
        }
    };

    Ok(NewBooking {
        day: validate_required_text(req.day.as_deref(), "day", MAX_NAME_LEN)?,
        time: validate_required_text(req.time.as_deref(), "time", MAX_NAME_LEN)?,
        people: validate_people(req.people, capacity)?,
        name: validate_required_text(req.name.as_deref(), "name", MAX_NAME_LEN)?,
        email: validate_email(req.email.as_deref())?,
        phone: validate_optional_text(req.phone.as_deref(), "phone", MAX_PHONE_LEN)?,
        payment,
    })
}

/// Spawn the best-effort notification task. Never awaited by the request.
fn spawn_notification(state: &AppState, booking: &Booking) {
    if let Some(mailer) = state.mailer.clone() {
        let booking = booking.clone();
        tokio::spawn(async move {
            mailer.notify(&booking).await;
        });
    }
}

/// POST /api/book
pub async fn book(
    State(state): State<AppState>,
    Json(req): Json<BookRequest>,
) -> AppResult<Response> {
    let new = validate_request(req, state.ledger.calendar().capacity())?;
    let booking = state.ledger.admit(new)?;

    tracing::info!(
        booking_number = booking.booking_number,
        day = %booking.day,
        time = %booking.time,
        people = booking.people,
        payment = ?booking.payment,
        "Booking admitted"
    );

    spawn_notification(&state, &booking);

    match booking.payment {
        PaymentMethod::Cash => Ok(Json(BookResponse {
            booking_number: booking.booking_number,
            payment_url: None,
        })
        .into_response()),
        PaymentMethod::Card => {
            let amount = state.checkout_amount(booking.people);
            match stripe::create_checkout_session(
                &state.stripe_secret_key,
                amount,
                &state.currency,
                booking.booking_number,
                &state.success_url,
                &state.cancel_url,
            )
            .await
            {
                Ok(url) => Ok(Json(BookResponse {
                    booking_number: booking.booking_number,
                    payment_url: Some(url),
                })
                .into_response()),
                Err(e) => {
                    // Admitted booking stands; the client can retry payment
                    // via /api/checkout.
                    tracing::error!(
                        booking_number = booking.booking_number,
                        error = %e,
                        "Stripe checkout session failed after admission"
                    );
                    Ok((
                        StatusCode::BAD_GATEWAY,
                        Json(json!({
                            "error": "Payment session could not be created",
                            "bookingNumber": booking.booking_number,
                        })),
                    )
                        .into_response())
                }
            }
        }
    }
}
