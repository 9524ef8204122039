// --- File: crates/smsify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Tencent Cloud SMS Template Config ---
// Template ids are preapproved on the vendor side; an empty id means the
// corresponding message kind is not available.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct SmsTemplates {
    /// Verification code template id. Loaded via TENCENT_SMS_TEMPLATE_VERIFICATION.
    #[serde(default)]
    pub verification: String,
    /// Notification template id. Loaded via TENCENT_SMS_TEMPLATE_NOTIFICATION.
    #[serde(default)]
    pub notification: String,
    /// Marketing template id. Loaded via TENCENT_SMS_TEMPLATE_MARKETING.
    #[serde(default)]
    pub marketing: String,
}

// --- Tencent Cloud SMS Config ---
// Holds credentials and identity for the vendor API. Secrets are normally
// loaded from env vars: TENCENT_SMS_SECRET_ID / TENCENT_SMS_SECRET_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TencentSmsConfig {
    #[serde(default)]
    pub secret_id: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_region_id")]
    pub region_id: String,
    #[serde(default)]
    pub sdk_app_id: String,
    /// SMS signature shown to recipients, registered with the vendor.
    #[serde(default)]
    pub sign_name: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub templates: SmsTemplates,
}

fn default_region_id() -> String {
    "ap-guangzhou".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for TencentSmsConfig {
    fn default() -> Self {
        Self {
            secret_id: String::new(),
            secret_key: String::new(),
            region_id: default_region_id(),
            sdk_app_id: String::new(),
            sign_name: String::new(),
            timeout_seconds: default_timeout_seconds(),
            templates: SmsTemplates::default(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_tencent_sms: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub tencent_sms: Option<TencentSmsConfig>,
}
