// --- File: crates/smsify_tencent/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    channel_info_handler, get_config_handler, send_batch_handler, send_notification_handler,
    send_sms_handler, send_verification_handler, test_connection_handler, TencentSmsState,
};
use crate::logic::TencentSmsService;

/// Creates a router containing all routes for the Tencent SMS feature.
///
/// Takes the shared service instance so the composition root can hand the
/// same singleton to both the routes and the channel registry.
///
/// # Returns
/// An Axum Router configured with the Tencent SMS routes and state.
pub fn routes(service: Arc<TencentSmsService>) -> Router {
    let state = Arc::new(TencentSmsState { service });

    Router::new()
        .route("/tencent/send", post(send_sms_handler))
        .route("/tencent/send-verification", post(send_verification_handler))
        .route("/tencent/send-notification", post(send_notification_handler))
        .route("/tencent/send-batch", post(send_batch_handler))
        .route("/tencent/test", get(test_connection_handler))
        .route("/tencent/config", get(get_config_handler))
        .route("/tencent/channel", get(channel_info_handler))
        .with_state(state)
}
