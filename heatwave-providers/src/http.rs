//! Shared HTTP classification helper for the three provider adapters.
//!
//! Each adapter is a thin `reqwest` client; this module is the one place
//! that turns a response's status code into the
//! [`HeatwaveError`] taxonomy a scheduler can dispatch on, per §4.3's
//! classification rules: 2xx with a parseable body is the caller's
//! problem to turn into articles, 429/5xx/timeout is transient and
//! retryable, any other 4xx or a malformed body is permanent.

use heatwave_types::HeatwaveError;
use reqwest::{Response, StatusCode};
use tracing::debug;

/// Send `request` and classify the outcome per §4.3. Returns the response
/// body text on success (2xx); every other outcome is already turned into
/// the right [`HeatwaveError`] variant.
pub async fn send_and_classify(request: reqwest::RequestBuilder) -> Result<String, HeatwaveError> {
    let response = request.send().await.map_err(classify_transport_error)?;
    classify_response(response).await
}

fn classify_transport_error(err: reqwest::Error) -> HeatwaveError {
    if err.is_timeout() || err.is_connect() {
        HeatwaveError::transient(format!("network error: {err}"))
    } else {
        HeatwaveError::transient(format!("request error: {err}"))
    }
}

async fn classify_response(response: Response) -> Result<String, HeatwaveError> {
    let status = response.status();
    if status.is_success() {
        return response
            .text()
            .await
            .map_err(|err| HeatwaveError::permanent(format!("reading response body: {err}")));
    }

    let body_snippet = response
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(200)
        .collect::<String>();

    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        debug!(%status, "classifying as transient remote error");
        Err(HeatwaveError::transient(format!(
            "http {status}: {body_snippet}"
        )))
    } else {
        debug!(%status, "classifying as permanent remote error");
        Err(HeatwaveError::permanent(format!(
            "http {status}: {body_snippet}"
        )))
    }
}
