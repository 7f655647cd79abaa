// src/utils/http.rs

//! HTTP client utilities.

use reqwest::Url;

use crate::error::{AppError, Result};
use crate::models::ContentConfig;

/// Create a configured asynchronous HTTP client.
///
/// No client-level timeout is set; attempts are bounded by the retry policy.
pub fn create_async_client(config: &ContentConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .build()?;
    Ok(client)
}

/// GET a URL and return the body, failing on non-success status.
pub async fn get_text(
    client: &reqwest::Client,
    url: Url,
    bearer: Option<&str>,
) -> Result<String> {
    let mut request = client.get(url.clone());
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::fetch_failed(status.as_u16(), url.as_str()));
    }
    Ok(response.text().await?)
}
