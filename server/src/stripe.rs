//! Stripe integration via REST API (no SDK dependency)
//!
//! One-off payment Checkout Sessions with inline price data. The amount is
//! already in Stripe's smallest currency unit when it reaches this module
//! and is passed through verbatim.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const CHECKOUT_SESSIONS_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

/// Form parameters for a payment-mode Checkout Session
fn checkout_params(
    amount: u64,
    currency: &str,
    booking_number: u64,
    success_url: &str,
    cancel_url: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("mode", "payment".to_string()),
        ("line_items[0][price_data][currency]", currency.to_string()),
        (
            "line_items[0][price_data][product_data][name]",
            "Sauna booking".to_string(),
        ),
        ("line_items[0][price_data][unit_amount]", amount.to_string()),
        ("line_items[0][quantity]", "1".to_string()),
        ("metadata[booking_number]", booking_number.to_string()),
        ("success_url", success_url.to_string()),
        ("cancel_url", cancel_url.to_string()),
    ]
}

/// Create a Stripe Checkout Session and return its hosted payment URL
pub async fn create_checkout_session(
    secret_key: &str,
    amount: u64,
    currency: &str,
    booking_number: u64,
    success_url: &str,
    cancel_url: &str,
) -> Result<String, BoxError> {
    let params = checkout_params(amount, currency, booking_number, success_url, cancel_url);

    let client = reqwest::Client::new();
    let resp: serde_json::Value = client
        .post(CHECKOUT_SESSIONS_URL)
        .basic_auth(secret_key, None::<&str>)
        .form(&params)
        .send()
        .await?
        .json()
        .await?;

    resp["url"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| format!("Stripe create_checkout failed: {resp}").into())
}
