// File: crates/services/smsify_backend/src/main.rs
use axum::{routing::get, Router};
use smsify_common::logging;
use smsify_common::services::ChannelRegistry;
use smsify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[cfg(feature = "tencent-sms")]
use smsify_tencent::{routes as tencent_routes, TencentSmsChannel, TencentSmsService};

#[tokio::main]
async fn main() {
    logging::init();
    let config = Arc::new(load_config().expect("Failed to load config"));

    // One registry for the whole process; every enabled provider registers
    // itself here exactly once.
    let registry = Arc::new(ChannelRegistry::new());

    let api_router = Router::new().route("/", get(|| async { "Welcome to Smsify API!" }));

    #[cfg(feature = "tencent-sms")]
    let tencent_router = {
        if smsify_common::is_tencent_sms_enabled(&config) {
            // The routes and the registry share one service instance.
            let service = Arc::new(TencentSmsService::from_app_config(&config));
            registry
                .register(Arc::new(TencentSmsChannel::new(service.clone())))
                .expect("tencent channel registration failed");
            Some(tencent_routes(service))
        } else {
            info!("Tencent SMS disabled by configuration");
            None
        }
    };

    info!("registered SMS channels: {:?}", registry.channel_types());

    let app = Router::new().nest("/api/v1/sms", {
        #[allow(unused_mut)] // stays mutable for the optional feature routers
        let mut router = api_router.merge(smsify_common::routes::routes(registry.clone()));
        #[cfg(feature = "tencent-sms")]
        {
            if let Some(tencent_router) = tencent_router {
                router = router.merge(tencent_router);
            }
        }
        router
    });

    #[allow(unused_mut)]
    let mut app = app.layer(TraceLayer::new_for_http());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "tencent-sms")]
        use smsify_tencent::doc::TencentSmsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Smsify API",
                version = "0.1.0",
                description = "Smsify Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Smsify", description = "SMS delivery endpoints")),
            servers( (url = "/api/v1/sms", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // stays mutable for the optional feature docs
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "tencent-sms")]
        openapi_doc.merge(TencentSmsApiDoc::openapi());
        info!("adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api/v1/sms", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
