// --- File: crates/smsify_tencent/src/logic.rs ---
//! Request formation and response normalization for Tencent Cloud SMS.
//!
//! [`TencentSmsService`] maps the four logical send operations onto the single
//! vendor `SendSms` call shape, validates configuration before any network
//! attempt, and folds every outcome into the uniform [`SendOutcome`] envelope.
//! No operation ever returns an error to its caller.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::error;

use smsify_common::services::{ConfigValidation, SendOutcome};
use smsify_config::{AppConfig, SmsTemplates, TencentSmsConfig};

use crate::transport::{
    SendSmsRequest, SendSmsResponse, SmsTransport, TencentCloudTransport, TransportError,
};

/// Maximum number of phone numbers accepted by one batch call.
pub const MAX_BATCH_SIZE: usize = 100;

/// Internal error plumbing. Converted to a failure envelope at every public
/// operation boundary; never visible to callers.
#[derive(Error, Debug)]
pub enum TencentSmsError {
    #[error("configuration invalid: {0}")]
    Config(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Redacted configuration view, safe to expose over HTTP.
/// Credentials are deliberately absent.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConfigSnapshot {
    pub region_id: String,
    pub sdk_app_id: String,
    pub sign_name: String,
    pub timeout_seconds: u64,
}

/// Partial configuration update. Absent fields keep their current value;
/// `templates` replaces the whole template set when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigPatch {
    pub secret_id: Option<String>,
    pub secret_key: Option<String>,
    pub region_id: Option<String>,
    pub sdk_app_id: Option<String>,
    pub sign_name: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub templates: Option<SmsTemplates>,
}

/// Adapter over one vendor transport. Holds no state beyond its config.
///
/// The held config is replaced wholesale on update, so operations always work
/// against the snapshot they started with.
pub struct TencentSmsService {
    config: RwLock<Arc<TencentSmsConfig>>,
    transport: Arc<dyn SmsTransport>,
}

impl TencentSmsService {
    pub fn new(config: TencentSmsConfig, transport: Arc<dyn SmsTransport>) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            transport,
        }
    }

    /// Builds a service from the application configuration with the production
    /// transport, falling back to defaults when the section is absent.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            config.tencent_sms.clone().unwrap_or_default(),
            Arc::new(TencentCloudTransport::new()),
        )
    }

    fn current_config(&self) -> Arc<TencentSmsConfig> {
        self.config.read().expect("config lock poisoned").clone()
    }

    /// Checks the credential and identity fields, in a fixed order.
    pub fn validate_config(&self) -> ConfigValidation {
        Self::validate(&self.current_config())
    }

    fn validate(config: &TencentSmsConfig) -> ConfigValidation {
        let mut errors = Vec::new();
        if config.secret_id.is_empty() {
            errors.push("secret_id must not be empty".to_string());
        }
        if config.secret_key.is_empty() {
            errors.push("secret_key must not be empty".to_string());
        }
        if config.sdk_app_id.is_empty() {
            errors.push("sdk_app_id must not be empty".to_string());
        }
        if config.sign_name.is_empty() {
            errors.push("sign_name must not be empty".to_string());
        }
        ConfigValidation {
            valid: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    fn checked_config(&self) -> Result<Arc<TencentSmsConfig>, TencentSmsError> {
        let config = self.current_config();
        let validation = Self::validate(&config);
        if !validation.valid {
            return Err(TencentSmsError::Config(validation.errors.join(", ")));
        }
        Ok(config)
    }

    /// Shared path for single and batch sends: precondition checks, vendor
    /// payload construction, transport call.
    async fn dispatch(
        &self,
        phones: &[String],
        template_id: &str,
        params: Vec<String>,
    ) -> Result<SendSmsResponse, TencentSmsError> {
        let config = self.checked_config()?;
        if phones.is_empty() {
            return Err(TencentSmsError::InvalidRequest(
                "phone number list must not be empty".to_string(),
            ));
        }
        if phones.len() > MAX_BATCH_SIZE {
            return Err(TencentSmsError::InvalidRequest(format!(
                "at most {MAX_BATCH_SIZE} phone numbers per batch"
            )));
        }
        if template_id.is_empty() {
            return Err(TencentSmsError::InvalidRequest(
                "template id must not be empty".to_string(),
            ));
        }

        let request = SendSmsRequest {
            sms_sdk_app_id: config.sdk_app_id.clone(),
            sign_name: config.sign_name.clone(),
            template_id: template_id.to_string(),
            phone_number_set: phones.to_vec(),
            template_param_set: params,
        };
        Ok(self.transport.send_sms(config, request).await?)
    }

    fn log_failure(phones: &[String], template_id: &str, error_text: &str) {
        error!(
            phones = ?phones,
            template_id = %template_id,
            error = %error_text,
            "SMS send failed"
        );
    }

    /// Send one templated message to one phone number.
    pub async fn send(&self, phone: &str, template_id: &str, params: Vec<String>) -> SendOutcome {
        let phones = vec![phone.to_string()];
        match self.dispatch(&phones, template_id, params).await {
            Ok(response) => match response.send_status_set.first() {
                Some(status) => {
                    let success = status.code == "Ok";
                    let message = if status.message.is_empty() {
                        "sent successfully".to_string()
                    } else {
                        status.message.clone()
                    };
                    SendOutcome {
                        success,
                        message,
                        data: serde_json::to_value(&response).ok(),
                        request_id: Some(response.request_id.clone()),
                    }
                }
                None => {
                    Self::log_failure(&phones, template_id, "vendor returned no delivery status");
                    SendOutcome::failure("SMS send failed: vendor returned no delivery status")
                }
            },
            Err(err) => {
                Self::log_failure(&phones, template_id, &err.to_string());
                SendOutcome::failure(format!("SMS send failed: {err}"))
            }
        }
    }

    /// Send a verification code using the configured verification template.
    ///
    /// Placeholder order matches the registered template: code first, expiry
    /// minutes second.
    pub async fn send_verification(
        &self,
        phone: &str,
        code: &str,
        expire_minutes: u32,
    ) -> SendOutcome {
        let template_id = self.current_config().templates.verification.clone();
        if template_id.is_empty() {
            error!(phone = %phone, "verification template not configured");
            return SendOutcome::failure("verification template not configured");
        }
        self.send(
            phone,
            &template_id,
            vec![code.to_string(), expire_minutes.to_string()],
        )
        .await
    }

    /// Send a notification message. Delegates to [`Self::send`]; the distinct
    /// name exists for API clarity.
    pub async fn send_notification(
        &self,
        phone: &str,
        template_id: &str,
        params: Vec<String>,
    ) -> SendOutcome {
        self.send(phone, template_id, params).await
    }

    /// Send one templated message to up to [`MAX_BATCH_SIZE`] phone numbers.
    ///
    /// Overall success means the vendor acknowledged the batch with a
    /// non-empty per-number status list; it does not guarantee every number
    /// succeeded. Callers needing per-number results must inspect `data`.
    pub async fn send_batch(
        &self,
        phones: &[String],
        template_id: &str,
        params: Vec<String>,
    ) -> SendOutcome {
        match self.dispatch(phones, template_id, params).await {
            Ok(response) => SendOutcome {
                success: !response.send_status_set.is_empty(),
                message: "batch send completed".to_string(),
                data: serde_json::to_value(&response).ok(),
                request_id: Some(response.request_id.clone()),
            },
            Err(err) => {
                Self::log_failure(phones, template_id, &err.to_string());
                SendOutcome::failure(format!("batch send failed: {err}"))
            }
        }
    }

    /// Probe configuration and transport client construction without sending
    /// anything.
    pub fn test_connection(&self) -> SendOutcome {
        let config = match self.checked_config() {
            Ok(config) => config,
            Err(err) => return SendOutcome::failure(format!("connection test failed: {err}")),
        };
        match self.transport.healthcheck(&config) {
            Ok(()) => SendOutcome {
                success: true,
                message: "Tencent Cloud SMS connection healthy".to_string(),
                data: Some(serde_json::json!({
                    "region_id": config.region_id,
                    "sdk_app_id": config.sdk_app_id,
                    "sign_name": config.sign_name,
                })),
                request_id: None,
            },
            Err(err) => SendOutcome::failure(format!("connection test failed: {err}")),
        }
    }

    /// Public-safe configuration view. Credentials never appear here.
    pub fn get_config(&self) -> ConfigSnapshot {
        let config = self.current_config();
        ConfigSnapshot {
            region_id: config.region_id.clone(),
            sdk_app_id: config.sdk_app_id.clone(),
            sign_name: config.sign_name.clone(),
            timeout_seconds: config.timeout_seconds,
        }
    }

    /// Apply a partial update. The held config is replaced wholesale, so
    /// calls already in flight keep the snapshot they started with.
    pub fn set_config(&self, patch: ConfigPatch) {
        let mut guard = self.config.write().expect("config lock poisoned");
        let mut updated = guard.as_ref().clone();
        if let Some(secret_id) = patch.secret_id {
            updated.secret_id = secret_id;
        }
        if let Some(secret_key) = patch.secret_key {
            updated.secret_key = secret_key;
        }
        if let Some(region_id) = patch.region_id {
            updated.region_id = region_id;
        }
        if let Some(sdk_app_id) = patch.sdk_app_id {
            updated.sdk_app_id = sdk_app_id;
        }
        if let Some(sign_name) = patch.sign_name {
            updated.sign_name = sign_name;
        }
        if let Some(timeout_seconds) = patch.timeout_seconds {
            updated.timeout_seconds = timeout_seconds;
        }
        if let Some(templates) = patch.templates {
            updated.templates = templates;
        }
        *guard = Arc::new(updated);
    }
}
