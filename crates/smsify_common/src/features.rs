// --- File: crates/smsify_common/src/features.rs ---
//! Feature flag handling for the Smsify application.
//!
//! Providers are gated two ways: compile-time cargo features on the backend
//! crate, and runtime `use_*` flags in the configuration. A provider is live
//! only when it is compiled in, its flag is set, and its config section exists.

use smsify_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Tencent Cloud SMS feature is enabled at runtime.
#[cfg(feature = "tencent-sms")]
pub fn is_tencent_sms_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_tencent_sms, config.tencent_sms.as_ref())
}
