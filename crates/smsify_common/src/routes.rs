// --- File: crates/smsify_common/src/routes.rs ---

use axum::{extract::State, routing::get, Router};
use serde_json::json;
use std::sync::Arc;

use crate::http::ApiResponse;
use crate::services::ChannelRegistry;

/// Creates a router with the provider-independent routes, backed by the
/// channel registry the composition root populated.
pub fn routes(registry: Arc<ChannelRegistry>) -> Router {
    Router::new()
        .route("/channels", get(list_channels_handler))
        .with_state(registry)
}

/// Lists the registered delivery backends with their public metadata.
async fn list_channels_handler(State(registry): State<Arc<ChannelRegistry>>) -> ApiResponse {
    let channels: Vec<serde_json::Value> = registry
        .channel_types()
        .iter()
        .filter_map(|key| registry.get(key))
        .map(|channel| {
            json!({
                "channel_type": channel.channel_type(),
                "display_name": channel.display_name(),
                "capabilities": channel.capabilities(),
            })
        })
        .collect();

    ApiResponse::ok(
        "channels fetched successfully",
        Some(json!({ "channels": channels })),
    )
}
