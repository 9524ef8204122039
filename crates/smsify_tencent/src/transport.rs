// --- File: crates/smsify_tencent/src/transport.rs ---
//! Vendor transport boundary for the Tencent Cloud SMS API.
//!
//! The service in [`crate::logic`] never talks to the network itself; it hands
//! a [`SendSmsRequest`] to an [`SmsTransport`] implementation together with a
//! config snapshot. The production implementation signs each call with the
//! vendor's TC3-HMAC-SHA256 scheme and posts it to `sms.tencentcloudapi.com`.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use smsify_common::http::client::{create_client, HTTP_CLIENT};
use smsify_common::services::BoxFuture;
use smsify_config::TencentSmsConfig;

const API_ACTION: &str = "SendSms";
const API_VERSION: &str = "2021-01-11";
const API_SERVICE: &str = "sms";
const DEFAULT_ENDPOINT: &str = "https://sms.tencentcloudapi.com";

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("SMS API request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("SMS API returned an error: {code}: {message}")]
    ApiError { code: String, message: String },
    #[error("Failed to parse SMS API response: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Transport configuration invalid: {0}")]
    ConfigError(String),
}

// --- Vendor Wire Types ---

/// Payload for the vendor `SendSms` call. Field names follow the wire format.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SendSmsRequest {
    pub sms_sdk_app_id: String,
    pub sign_name: String,
    pub template_id: String,
    pub phone_number_set: Vec<String>,
    pub template_param_set: Vec<String>,
}

/// Per-number delivery status inside a vendor response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendStatus {
    #[serde(default)]
    pub serial_no: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub fee: u32,
    #[serde(default)]
    pub session_context: String,
    /// "Ok" on success; anything else is a vendor-side delivery failure.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub iso_code: String,
}

/// Successful vendor response, unwrapped from the outer `Response` envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendSmsResponse {
    #[serde(default)]
    pub send_status_set: Vec<SendStatus>,
    #[serde(default)]
    pub request_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiEnvelope {
    response: ApiResponseBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiResponseBody {
    #[serde(default)]
    send_status_set: Vec<SendStatus>,
    #[serde(default)]
    request_id: String,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiErrorBody {
    code: String,
    message: String,
}

// --- Transport Capability ---

/// Capability boundary in front of the vendor network client.
///
/// A config snapshot travels with every call so that configuration swaps do
/// not affect calls already in flight.
pub trait SmsTransport: Send + Sync {
    /// Issue one `SendSms` call.
    fn send_sms(
        &self,
        config: Arc<TencentSmsConfig>,
        request: SendSmsRequest,
    ) -> BoxFuture<'_, SendSmsResponse, TransportError>;

    /// Verify the transport could issue a call with this config, without
    /// touching the network.
    fn healthcheck(&self, config: &TencentSmsConfig) -> Result<(), TransportError>;
}

// --- Production Implementation ---

/// Signed HTTPS transport against the vendor API.
pub struct TencentCloudTransport {
    client: Client,
    endpoint: String,
}

impl TencentCloudTransport {
    pub fn new() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Transport against a non-default endpoint (test servers).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for TencentCloudTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsTransport for TencentCloudTransport {
    fn send_sms(
        &self,
        config: Arc<TencentSmsConfig>,
        request: SendSmsRequest,
    ) -> BoxFuture<'_, SendSmsResponse, TransportError> {
        Box::pin(async move {
            let payload = serde_json::to_string(&request)?;
            let url = reqwest::Url::parse(&self.endpoint)
                .map_err(|e| TransportError::ConfigError(format!("invalid endpoint: {e}")))?;
            let host = url.host_str().unwrap_or_default().to_string();
            let timestamp = Utc::now().timestamp();
            let authorization = build_authorization(&config, &host, &payload, timestamp);

            let response = self
                .client
                .post(url)
                .timeout(Duration::from_secs(config.timeout_seconds))
                .header("Content-Type", "application/json; charset=utf-8")
                .header("Authorization", authorization)
                .header("X-TC-Action", API_ACTION)
                .header("X-TC-Version", API_VERSION)
                .header("X-TC-Region", &config.region_id)
                .header("X-TC-Timestamp", timestamp.to_string())
                .body(payload)
                .send()
                .await?;

            let body = response.text().await?;
            parse_response(&body)
        })
    }

    fn healthcheck(&self, config: &TencentSmsConfig) -> Result<(), TransportError> {
        reqwest::Url::parse(&self.endpoint)
            .map_err(|e| TransportError::ConfigError(format!("invalid endpoint: {e}")))?;
        create_client(config.timeout_seconds, true)?;
        Ok(())
    }
}

/// Unwraps the vendor `Response` envelope, surfacing API-level errors.
pub(crate) fn parse_response(body: &str) -> Result<SendSmsResponse, TransportError> {
    let envelope: ApiEnvelope = serde_json::from_str(body)?;
    if let Some(error) = envelope.response.error {
        return Err(TransportError::ApiError {
            code: error.code,
            message: error.message,
        });
    }
    Ok(SendSmsResponse {
        send_status_set: envelope.response.send_status_set,
        request_id: envelope.response.request_id,
    })
}

// --- TC3-HMAC-SHA256 Request Signing ---
//
// The vendor authenticates each call with a signature over a canonical form
// of the request. Key derivation chains HMACs from the secret key through
// the date, service, and a fixed terminator.

type HmacSha256 = Hmac<Sha256>;

pub(crate) fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Canonical request string; hashed into the string-to-sign.
pub(crate) fn build_canonical_request(host: &str, payload: &str) -> String {
    let canonical_headers = format!(
        "content-type:application/json; charset=utf-8\nhost:{}\nx-tc-action:{}\n",
        host,
        API_ACTION.to_lowercase()
    );
    format!(
        "POST\n/\n\n{}\n{}\n{}",
        canonical_headers,
        SIGNED_HEADERS,
        sha256_hex(payload.as_bytes())
    )
}

const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

/// Builds the TC3-HMAC-SHA256 `Authorization` header value for one request.
pub(crate) fn build_authorization(
    config: &TencentSmsConfig,
    host: &str,
    payload: &str,
    timestamp: i64,
) -> String {
    let date = DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let canonical_request = build_canonical_request(host, payload);
    let credential_scope = format!("{date}/{API_SERVICE}/tc3_request");
    let string_to_sign = format!(
        "TC3-HMAC-SHA256\n{}\n{}\n{}",
        timestamp,
        credential_scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let secret_date = hmac_sha256(format!("TC3{}", config.secret_key).as_bytes(), date.as_bytes());
    let secret_service = hmac_sha256(&secret_date, API_SERVICE.as_bytes());
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
    let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

    format!(
        "TC3-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
        config.secret_id, credential_scope, SIGNED_HEADERS, signature
    )
}
