// --- File: crates/smsify_tencent/src/channel.rs ---
//! [`SmsChannel`] implementation exposing this connector through the host
//! channel registry.

use std::sync::Arc;

use smsify_common::services::{
    ConfigField, ConfigValidation, OutcomeFuture, ProviderInfo, SmsChannel,
};

use crate::logic::TencentSmsService;

/// Registry key for this backend.
pub const CHANNEL_TYPE: &str = "tencent";

/// Channel adapter over a shared service instance. The routes and the
/// registry both hold the same [`TencentSmsService`].
pub struct TencentSmsChannel {
    service: Arc<TencentSmsService>,
}

impl TencentSmsChannel {
    pub fn new(service: Arc<TencentSmsService>) -> Self {
        Self { service }
    }
}

impl SmsChannel for TencentSmsChannel {
    fn channel_type(&self) -> &'static str {
        CHANNEL_TYPE
    }

    fn display_name(&self) -> &'static str {
        "Tencent Cloud SMS"
    }

    fn capabilities(&self) -> Vec<&'static str> {
        vec!["verification", "notification", "marketing", "international"]
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        vec![
            ConfigField {
                name: "secret_id",
                label: "Secret ID",
                kind: "text",
                required: true,
                default: "",
            },
            ConfigField {
                name: "secret_key",
                label: "Secret Key",
                kind: "password",
                required: true,
                default: "",
            },
            ConfigField {
                name: "region_id",
                label: "Region ID",
                kind: "text",
                required: false,
                default: "ap-guangzhou",
            },
            ConfigField {
                name: "sdk_app_id",
                label: "SDK App ID",
                kind: "text",
                required: true,
                default: "",
            },
            ConfigField {
                name: "sign_name",
                label: "SMS Signature",
                kind: "text",
                required: true,
                default: "",
            },
        ]
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "Tencent Cloud",
            website: "https://cloud.tencent.com/",
            description: "Tencent Cloud SMS delivery service",
            regions: vec![
                "ap-guangzhou",
                "ap-beijing",
                "ap-shanghai",
                "ap-hongkong",
                "ap-singapore",
                "na-siliconvalley",
            ],
        }
    }

    fn validate_config(&self) -> ConfigValidation {
        self.service.validate_config()
    }

    fn send(&self, phone: &str, template_id: &str, params: Vec<String>) -> OutcomeFuture<'_> {
        let phone = phone.to_string();
        let template_id = template_id.to_string();
        Box::pin(async move { self.service.send(&phone, &template_id, params).await })
    }
}
