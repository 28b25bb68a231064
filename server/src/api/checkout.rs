//! Checkout endpoint
//!
//! Separate payment step for an already admitted card booking (the booking
//! form calls /api/book first, then follows up here for the redirect URL).
//! The amount is always recomputed server-side from the stored booking; a
//! client-supplied amount is verified against it, never trusted.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::ledger::PaymentMethod;
use crate::state::AppState;
use crate::stripe;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub booking_number: Option<u64>,
    /// Optional client echo of the total; must match the server figure.
    #[serde(default)]
    pub amount: Option<u64>,
}

/// POST /api/checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let booking_number = req
        .booking_number
        .ok_or_else(|| AppError::InvalidRequest("bookingNumber is required".into()))?;

    let booking = state
        .ledger
        .find(booking_number)?
        .ok_or_else(|| AppError::NotFound(format!("Booking {booking_number} not found")))?;

    if booking.payment != PaymentMethod::Card {
        return Err(AppError::InvalidRequest(format!(
            "Booking {booking_number} is payable in cash and has no online checkout"
        )));
    }

    let amount = state.checkout_amount(booking.people);
    if let Some(client_amount) = req.amount
        && client_amount != amount
    {
        return Err(AppError::InvalidRequest(format!(
            "Amount mismatch for booking {booking_number}: expected {amount}, got {client_amount}"
        )));
    }

    let url = stripe::create_checkout_session(
        &state.stripe_secret_key,
        amount,
        &state.currency,
        booking.booking_number,
        &state.success_url,
        &state.cancel_url,
    )
    .await
    .map_err(|e| AppError::Payment(e.to_string()))?;

    Ok(Json(json!({ "url": url })))
}
