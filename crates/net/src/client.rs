//! HTTP client wrapper

use papermc_config::ApiConfig;
use papermc_errors::{Error, NetworkError};
use reqwest::{Client, Response};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Longest error body kept in an `HttpError`
const MAX_ERROR_BODY: usize = 512;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for NetConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            timeout: api.timeout(),
            connect_timeout: api.connect_timeout(),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 4,
            user_agent: api.user_agent.clone(),
        }
    }
}

/// HTTP client wrapper
///
/// Every request honours a [`CancellationToken`] and maps transport
/// failures and non-2xx statuses onto [`NetworkError`]. There is no retry.
#[derive(Clone)]
pub struct NetClient {
    client: Client,
    config: NetConfig,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> &NetConfig {
        &self.config
    }

    /// Execute a GET request and require a success status
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the token fires before headers arrive, a
    /// `NetworkError` for transport failures, and `HttpError` with the
    /// (truncated) body for non-2xx responses.
    pub async fn get(&self, url: &str, cancel: &CancellationToken) -> Result<Response, Error> {
        let request = self.client.get(url).send();

        let response = tokio::select! {
            () = cancel.cancelled() => return Err(Error::Cancelled),
            result = request => result.map_err(|e| map_reqwest_error(&e, url))?,
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = tokio::select! {
            () = cancel.cancelled() => return Err(Error::Cancelled),
            body = response.text() => body.unwrap_or_default(),
        };

        Err(NetworkError::HttpError {
            status: status.as_u16(),
            url: url.to_string(),
            body: truncate(body),
        }
        .into())
    }

    /// GET a URL and collect the full body
    ///
    /// # Errors
    ///
    /// Same as [`NetClient::get`], plus `Stream` if the body cannot be read.
    pub async fn get_bytes(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<bytes::Bytes, Error> {
        let response = self.get(url, cancel).await?;

        tokio::select! {
            () = cancel.cancelled() => Err(Error::Cancelled),
            body = response.bytes() => body.map_err(|e| map_reqwest_error(&e, url)),
        }
    }
}

/// Map a reqwest failure onto the network error taxonomy
pub(crate) fn map_reqwest_error(e: &reqwest::Error, url: &str) -> Error {
    let err = if e.is_timeout() {
        NetworkError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        NetworkError::Connection(e.to_string())
    } else if e.is_builder() {
        NetworkError::InvalidUrl(format!("{url}: {e}"))
    } else if e.is_body() || e.is_decode() {
        NetworkError::Stream(e.to_string())
    } else {
        NetworkError::RequestFailed(e.to_string())
    };
    err.into()
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_body() {
        let body = "x".repeat(MAX_ERROR_BODY + 10);
        let out = truncate(body);
        assert_eq!(out.len(), MAX_ERROR_BODY + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let body = "é".repeat(MAX_ERROR_BODY);
        let out = truncate(body);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_config_from_api() {
        let api = ApiConfig {
            timeout: 7,
            ..ApiConfig::default()
        };
        let config = NetConfig::from(&api);
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert!(config.user_agent.starts_with("papermc/"));
    }
}
