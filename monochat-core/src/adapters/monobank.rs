//! Monobank personal API client
//!
//! Two endpoints are used:
//! - `GET /personal/statement/{account}/{from}/{to}` (unix seconds)
//! - `GET /personal/client-info`
//!
//! Both authenticate with the personal token in the `X-Token` header.
//! API documentation: https://api.monobank.ua/docs/

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{ClientInfo, TransactionRecord};
use crate::ports::BankApi;

/// Production API URL
pub const MONOBANK_PRODUCTION_URL: &str = "https://api.monobank.ua";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error body returned with non-2xx responses
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error_description: String,
}

/// Blocking HTTP client for the personal API
#[derive(Debug)]
pub struct MonobankClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl MonobankClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid Monobank API URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Monobank API URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn production() -> Result<Self> {
        Self::new(MONOBANK_PRODUCTION_URL, DEFAULT_TIMEOUT_SECS)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn statement_url(&self, account: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
        format!(
            "{}/personal/statement/{}/{}/{}",
            self.base_url,
            account,
            from.timestamp(),
            to.timestamp()
        )
    }

    fn get(&self, url: &str, token: &str) -> Result<Response> {
        if token.is_empty() {
            return Err(Error::not_found("token is not set"));
        }

        let response = self
            .client
            .get(url)
            .header("X-Token", token)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(response)
    }

    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Api(format!(
                "Connection timed out after {} seconds",
                self.timeout_secs
            ))
        } else if error.is_connect() {
            Error::Api("Unable to connect to Monobank servers".to_string())
        } else {
            Error::Api(format!("Monobank request failed: {error}"))
        }
    }

    /// Pass 2xx responses through, turn everything else into an API error
    fn check_response_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let description = response
            .json::<ErrorResponse>()
            .map(|body| body.error_description)
            .unwrap_or_default();

        let message = match status.as_u16() {
            403 => "Monobank rejected the token. It may be invalid or revoked.".to_string(),
            429 => "Monobank rate limit exceeded. Statements can be requested once per minute."
                .to_string(),
            code => format!("Monobank API error: HTTP {code}"),
        };

        if description.is_empty() {
            Err(Error::Api(message))
        } else {
            Err(Error::Api(format!("{message} ({description})")))
        }
    }
}

impl BankApi for MonobankClient {
    fn get_transactions(
        &self,
        token: &str,
        account: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TransactionRecord>> {
        if account.is_empty() {
            return Err(Error::not_found("account is not set"));
        }

        let response = self.get(&self.statement_url(account, from, to), token)?;
        response
            .json()
            .map_err(|e| Error::Api(format!("Failed to parse Monobank statement: {e}")))
    }

    fn get_client_info(&self, token: &str) -> Result<ClientInfo> {
        let url = format!("{}/personal/client-info", self.base_url);
        let response = self.get(&url, token)?;
        response
            .json()
            .map_err(|e| Error::Api(format!("Failed to parse Monobank client info: {e}")))
    }
}
