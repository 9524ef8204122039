// --- File: crates/smsify_tencent/src/handlers.rs ---
use axum::{extract::State, Json};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use smsify_common::error::{validation_error, SmsifyError};
use smsify_common::http::ApiResponse;
use smsify_common::services::SmsChannel;

use crate::channel::TencentSmsChannel;
use crate::logic::{TencentSmsService, MAX_BATCH_SIZE};

/// Mainland mobile number shape accepted at this boundary.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("valid phone pattern"));

const DEFAULT_VERIFICATION_EXPIRE_MINUTES: u32 = 10;

// Define shared state needed by the SMS handlers
#[derive(Clone)]
pub struct TencentSmsState {
    pub service: Arc<TencentSmsService>,
}

// --- Request Bodies ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendRequest {
    pub phone: String,
    pub template_id: String,
    #[serde(default)]
    pub params: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendVerificationRequest {
    pub phone: String,
    pub code: String,
    /// Expiry minutes to interpolate into the template, 1-60.
    pub expire: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendBatchRequest {
    pub phones: Vec<String>,
    pub template_id: String,
    #[serde(default)]
    pub params: Vec<String>,
}

// --- Input Validation ---

fn validate_phone(phone: &str) -> Result<(), SmsifyError> {
    if PHONE_PATTERN.is_match(phone) {
        Ok(())
    } else {
        Err(validation_error(format!("invalid phone number: {phone}")))
    }
}

fn validate_template_id(template_id: &str) -> Result<(), SmsifyError> {
    if template_id.is_empty() {
        return Err(validation_error("template_id is required"));
    }
    Ok(())
}

// --- Handlers ---

/// Handler for sending a single templated SMS.
pub async fn send_sms_handler(
    State(state): State<Arc<TencentSmsState>>,
    Json(payload): Json<SendRequest>,
) -> Result<ApiResponse, SmsifyError> {
    validate_phone(&payload.phone)?;
    validate_template_id(&payload.template_id)?;

    let outcome = state
        .service
        .send(&payload.phone, &payload.template_id, payload.params)
        .await;
    Ok(ApiResponse::from(outcome))
}

/// Handler for sending a verification code.
pub async fn send_verification_handler(
    State(state): State<Arc<TencentSmsState>>,
    Json(payload): Json<SendVerificationRequest>,
) -> Result<ApiResponse, SmsifyError> {
    validate_phone(&payload.phone)?;
    if payload.code.len() < 4 || payload.code.len() > 6 {
        return Err(validation_error("code must be 4-6 characters"));
    }
    let expire = payload
        .expire
        .unwrap_or(DEFAULT_VERIFICATION_EXPIRE_MINUTES);
    if !(1..=60).contains(&expire) {
        return Err(validation_error("expire must be between 1 and 60 minutes"));
    }

    let outcome = state
        .service
        .send_verification(&payload.phone, &payload.code, expire)
        .await;
    Ok(ApiResponse::from(outcome))
}

/// Handler for sending a notification SMS.
pub async fn send_notification_handler(
    State(state): State<Arc<TencentSmsState>>,
    Json(payload): Json<SendRequest>,
) -> Result<ApiResponse, SmsifyError> {
    validate_phone(&payload.phone)?;
    validate_template_id(&payload.template_id)?;

    let outcome = state
        .service
        .send_notification(&payload.phone, &payload.template_id, payload.params)
        .await;
    Ok(ApiResponse::from(outcome))
}

/// Handler for sending one message to a batch of phone numbers.
pub async fn send_batch_handler(
    State(state): State<Arc<TencentSmsState>>,
    Json(payload): Json<SendBatchRequest>,
) -> Result<ApiResponse, SmsifyError> {
    if payload.phones.is_empty() {
        return Err(validation_error("phones must contain at least one number"));
    }
    if payload.phones.len() > MAX_BATCH_SIZE {
        return Err(validation_error(format!(
            "phones must contain at most {MAX_BATCH_SIZE} numbers"
        )));
    }
    for phone in &payload.phones {
        validate_phone(phone)?;
    }
    validate_template_id(&payload.template_id)?;

    let outcome = state
        .service
        .send_batch(&payload.phones, &payload.template_id, payload.params)
        .await;
    Ok(ApiResponse::from(outcome))
}

/// Handler probing configuration and transport health.
pub async fn test_connection_handler(
    State(state): State<Arc<TencentSmsState>>,
) -> Result<ApiResponse, SmsifyError> {
    Ok(ApiResponse::from(state.service.test_connection()))
}

/// Handler returning the redacted configuration snapshot.
pub async fn get_config_handler(
    State(state): State<Arc<TencentSmsState>>,
) -> Result<ApiResponse, SmsifyError> {
    let snapshot = state.service.get_config();
    Ok(ApiResponse::ok(
        "config fetched successfully",
        serde_json::to_value(snapshot).ok(),
    ))
}

/// Handler returning the channel's public metadata.
pub async fn channel_info_handler(
    State(state): State<Arc<TencentSmsState>>,
) -> Result<ApiResponse, SmsifyError> {
    let channel = TencentSmsChannel::new(state.service.clone());
    let data = json!({
        "channel_type": channel.channel_type(),
        "display_name": channel.display_name(),
        "capabilities": channel.capabilities(),
        "config_fields": channel.config_fields(),
        "provider_info": channel.provider_info(),
    });
    Ok(ApiResponse::ok("channel info fetched successfully", Some(data)))
}
