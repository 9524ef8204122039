// --- File: crates/smsify_config/src/lib.rs ---

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;

pub mod models;
pub use models::{AppConfig, ServerConfig, SmsTemplates, TencentSmsConfig};

static DOTENV: Once = Once::new();

/// Loads `.env` once per process. Later calls are no-ops, so every entry point
/// (binary, tests, tools) can call this without coordinating.
pub fn ensure_dotenv_loaded() {
    DOTENV.call_once(|| {
        let _ = dotenv::dotenv();
    });
}

/// Loads the unified application configuration.
///
/// Sources are layered: serde defaults, then an optional config file
/// (`config/default.{toml,yaml,json}`, overridable via `SMSIFY_CONFIG`), then
/// the `SMSIFY_` env tree (e.g. `SMSIFY_SERVER__PORT`), and finally the
/// documented `TENCENT_SMS_*` variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let config_path =
        std::env::var("SMSIFY_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let config = Config::builder()
        .add_source(File::with_name(&config_path).required(false))
        .add_source(
            Environment::with_prefix("SMSIFY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    let config: AppConfig = config.try_deserialize()?;
    Ok(apply_env_overrides(config))
}

fn env_override(target: &mut String, var: &str, touched: &mut bool) {
    if let Ok(value) = std::env::var(var) {
        *target = value;
        *touched = true;
    }
}

/// Applies the flat `TENCENT_SMS_*` environment variables on top of whatever
/// the file/env-tree sources produced. Any present variable materializes the
/// section and switches the channel on, so a purely env-driven deployment
/// needs no config file at all.
pub fn apply_env_overrides(mut config: AppConfig) -> AppConfig {
    let had_section = config.tencent_sms.is_some();
    let mut sms = config.tencent_sms.take().unwrap_or_default();
    let mut touched = false;

    env_override(&mut sms.secret_id, "TENCENT_SMS_SECRET_ID", &mut touched);
    env_override(&mut sms.secret_key, "TENCENT_SMS_SECRET_KEY", &mut touched);
    env_override(&mut sms.region_id, "TENCENT_SMS_REGION_ID", &mut touched);
    env_override(&mut sms.sdk_app_id, "TENCENT_SMS_SDK_APP_ID", &mut touched);
    env_override(&mut sms.sign_name, "TENCENT_SMS_SIGN_NAME", &mut touched);
    if let Ok(value) = std::env::var("TENCENT_SMS_TIMEOUT") {
        match value.parse() {
            Ok(seconds) => {
                sms.timeout_seconds = seconds;
                touched = true;
            }
            Err(_) => {
                tracing::warn!("ignoring non-numeric TENCENT_SMS_TIMEOUT: {value}");
            }
        }
    }
    env_override(
        &mut sms.templates.verification,
        "TENCENT_SMS_TEMPLATE_VERIFICATION",
        &mut touched,
    );
    env_override(
        &mut sms.templates.notification,
        "TENCENT_SMS_TEMPLATE_NOTIFICATION",
        &mut touched,
    );
    env_override(
        &mut sms.templates.marketing,
        "TENCENT_SMS_TEMPLATE_MARKETING",
        &mut touched,
    );

    if had_section || touched {
        config.tencent_sms = Some(sms);
    }
    if touched {
        config.use_tencent_sms = true;
    }
    config
}
