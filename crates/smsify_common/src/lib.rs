// --- File: crates/smsify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP envelope and shared client
pub mod logging; // Logging utilities
pub mod routes; // Provider-independent routes
pub mod services; // Channel abstractions and registry

// Re-export error types and utilities for easier access
pub use error::{
    config_error, conflict, external_service_error, validation_error, HttpStatusCode, SmsifyError,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    ApiResponse, IntoHttpResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

// Re-export channel abstractions for easier access
pub use services::{
    BoxFuture, ChannelRegistry, ConfigValidation, OutcomeFuture, SendOutcome, SmsChannel,
};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

#[cfg(feature = "tencent-sms")]
pub use features::is_tencent_sms_enabled;
