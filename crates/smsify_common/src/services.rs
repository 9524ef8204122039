// --- File: crates/smsify_common/src/services.rs ---
//! Service abstractions for pluggable SMS delivery backends.
//!
//! This module defines the `SmsChannel` trait that every delivery backend
//! implements, the registry the composition root populates at startup, and the
//! shared result shapes (`SendOutcome`, `ConfigValidation`) those backends
//! return. Keeping these here decouples route plumbing and the backend binary
//! from any concrete provider crate.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use crate::error::{conflict, SmsifyError};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Type alias for a boxed future used by operations that never fail outright
/// and instead report their outcome inside the returned value.
pub type OutcomeFuture<'a> = Pin<Box<dyn Future<Output = SendOutcome> + Send + 'a>>;

/// Uniform envelope returned by every send-style operation, success or failure.
///
/// `data` echoes the raw vendor response for diagnostics and is not
/// interpreted further.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    pub message: String,
    pub data: Option<Value>,
    pub request_id: Option<String>,
}

impl SendOutcome {
    pub fn success(
        message: impl Into<String>,
        data: Option<Value>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            request_id,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            request_id: None,
        }
    }
}

/// Result of validating a channel configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Reserved; no current check emits warnings.
    pub warnings: Vec<String>,
}

/// Descriptor for one channel configuration field, for admin surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigField {
    pub name: &'static str,
    pub label: &'static str,
    /// Rendering hint: "text" or "password".
    pub kind: &'static str,
    pub required: bool,
    pub default: &'static str,
}

/// Static metadata about the provider behind a channel.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    pub name: &'static str,
    pub website: &'static str,
    pub description: &'static str,
    pub regions: Vec<&'static str>,
}

/// A pluggable SMS delivery backend registered under a string key.
///
/// Implementations wrap one provider's service object. `send` never returns an
/// error: every failure is reported inside the [`SendOutcome`] envelope.
pub trait SmsChannel: Send + Sync {
    /// Stable registry key for this backend (e.g. `"tencent"`).
    fn channel_type(&self) -> &'static str;

    /// Human-readable provider name.
    fn display_name(&self) -> &'static str;

    /// Message kinds this backend can deliver.
    fn capabilities(&self) -> Vec<&'static str>;

    /// Configuration fields this backend expects, for admin surfaces.
    /// Field values are never included here.
    fn config_fields(&self) -> Vec<ConfigField>;

    /// Static provider metadata.
    fn provider_info(&self) -> ProviderInfo;

    /// Validates the backend's current configuration.
    fn validate_config(&self) -> ConfigValidation;

    /// Send one templated message to one phone number.
    fn send(&self, phone: &str, template_id: &str, params: Vec<String>) -> OutcomeFuture<'_>;
}

/// Registry of delivery backends keyed by channel type.
///
/// Populated once by the composition root at startup; lookups afterwards are
/// read-only, so the lock is effectively uncontended.
#[derive(Default)]
pub struct ChannelRegistry {
    channels: RwLock<HashMap<String, Arc<dyn SmsChannel>>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a backend under its channel type. Registering the same key
    /// twice is refused; the original plugin must stay authoritative.
    pub fn register(&self, channel: Arc<dyn SmsChannel>) -> Result<(), SmsifyError> {
        let key = channel.channel_type().to_string();
        let mut channels = self.channels.write().expect("channel registry poisoned");
        if channels.contains_key(&key) {
            return Err(conflict(format!("channel '{key}' is already registered")));
        }
        channels.insert(key, channel);
        Ok(())
    }

    pub fn get(&self, channel_type: &str) -> Option<Arc<dyn SmsChannel>> {
        self.channels
            .read()
            .expect("channel registry poisoned")
            .get(channel_type)
            .cloned()
    }

    /// Registered channel keys, sorted for stable output.
    pub fn channel_types(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .channels
            .read()
            .expect("channel registry poisoned")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}
