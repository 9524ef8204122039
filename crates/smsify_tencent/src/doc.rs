// --- File: crates/smsify_tencent/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]
// Allow dead code for the dummy functions used by the macros
#![allow(dead_code)]

use utoipa::OpenApi;

use crate::handlers::{SendBatchRequest, SendRequest, SendVerificationRequest};
use crate::logic::ConfigSnapshot;
use smsify_common::http::ApiResponse;

#[utoipa::path(
    post,
    path = "/tencent/send",
    request_body = SendRequest,
    responses(
        (status = 200, description = "Operation envelope; `code` is 200 on delivery success, 500 otherwise", body = ApiResponse),
        (status = 400, description = "Invalid phone number or missing template_id", body = String)
    ),
    tag = "Tencent SMS"
)]
fn doc_send() {}

#[utoipa::path(
    post,
    path = "/tencent/send-verification",
    request_body = SendVerificationRequest,
    responses(
        (status = 200, description = "Operation envelope", body = ApiResponse),
        (status = 400, description = "Invalid phone number, code length, or expiry", body = String)
    ),
    tag = "Tencent SMS"
)]
fn doc_send_verification() {}

#[utoipa::path(
    post,
    path = "/tencent/send-notification",
    request_body = SendRequest,
    responses(
        (status = 200, description = "Operation envelope", body = ApiResponse),
        (status = 400, description = "Invalid phone number or missing template_id", body = String)
    ),
    tag = "Tencent SMS"
)]
fn doc_send_notification() {}

#[utoipa::path(
    post,
    path = "/tencent/send-batch",
    request_body = SendBatchRequest,
    responses(
        (status = 200, description = "Operation envelope; success means the vendor acknowledged the batch", body = ApiResponse),
        (status = 400, description = "Invalid phone list or missing template_id", body = String)
    ),
    tag = "Tencent SMS"
)]
fn doc_send_batch() {}

#[utoipa::path(
    get,
    path = "/tencent/test",
    responses(
        (status = 200, description = "Connection probe envelope", body = ApiResponse)
    ),
    tag = "Tencent SMS"
)]
fn doc_test_connection() {}

#[utoipa::path(
    get,
    path = "/tencent/config",
    responses(
        (status = 200, description = "Redacted configuration snapshot; credentials are never included", body = ApiResponse)
    ),
    tag = "Tencent SMS"
)]
fn doc_get_config() {}

#[utoipa::path(
    get,
    path = "/tencent/channel",
    responses(
        (status = 200, description = "Channel metadata: capabilities, config field descriptors, provider info", body = ApiResponse)
    ),
    tag = "Tencent SMS"
)]
fn doc_channel_info() {}

// Define the main OpenAPI documentation structure for this crate/feature
#[derive(OpenApi)]
#[openapi(
    paths(
        doc_send,
        doc_send_verification,
        doc_send_notification,
        doc_send_batch,
        doc_test_connection,
        doc_get_config,
        doc_channel_info
    ),
    components(schemas(
        SendRequest,
        SendVerificationRequest,
        SendBatchRequest,
        ApiResponse,
        ConfigSnapshot
    )),
    tags(
        (name = "Tencent SMS", description = "Tencent Cloud SMS delivery API")
    )
)]
pub struct TencentSmsApiDoc;
