//! Availability and calendar endpoints

use axum::{Json, extract::State};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/availability — taken count per slot key
///
/// `{ "<day>|<time>": taken, ... }` for every slot in the published
/// calendar, recomputed from the store on every call.
pub async fn get_availability(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<String, u32>>> {
    let taken = state.ledger.availability()?;
    Ok(Json(taken))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub days: Vec<String>,
    pub times: Vec<String>,
    pub capacity: u32,
    pub price_per_person: u64,
    pub currency: String,
}

/// GET /api/calendar — the published booking grid and pricing
pub async fn get_calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    let calendar = state.ledger.calendar();
    Json(CalendarResponse {
        days: calendar.days().to_vec(),
        times: calendar.times().to_vec(),
        capacity: calendar.capacity(),
        price_per_person: state.price_per_person,
        currency: state.currency.clone(),
    })
}
