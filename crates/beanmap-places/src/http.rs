//! Shared HTTP plumbing for the collaborator clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};

use crate::error::PlacesError;

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, PlacesError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .user_agent(user_agent)
        .build()?)
}

/// Parse `raw` as a base URL that ends in exactly one slash, so relative
/// joins append to the path instead of replacing its last segment.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, PlacesError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Send `request`, reject non-2xx statuses, and parse the body as JSON.
pub(crate) async fn send_json<T>(request: RequestBuilder, context: &str) -> Result<T, PlacesError>
where
    T: serde::de::DeserializeOwned,
{
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PlacesError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
