// --- File: crates/smsify_tencent/src/logic_test.rs ---
#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use smsify_common::services::BoxFuture;
    use smsify_config::{SmsTemplates, TencentSmsConfig};

    use crate::logic::{ConfigPatch, TencentSmsService};
    use crate::transport::{
        SendSmsRequest, SendSmsResponse, SendStatus, SmsTransport, TransportError,
    };

    fn response_with_status(code: &str, message: &str, request_id: &str) -> SendSmsResponse {
        SendSmsResponse {
            send_status_set: vec![SendStatus {
                code: code.to_string(),
                message: message.to_string(),
                ..SendStatus::default()
            }],
            request_id: request_id.to_string(),
        }
    }

    /// Transport double that records every request and replays queued
    /// responses. Falls back to a plain "Ok" response when the queue is empty.
    struct StubTransport {
        calls: AtomicUsize,
        requests: Mutex<Vec<SendSmsRequest>>,
        responses: Mutex<Vec<Result<SendSmsResponse, TransportError>>>,
        healthy: bool,
    }

    impl StubTransport {
        fn with_response(response: Result<SendSmsResponse, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(vec![response]),
                healthy: true,
            })
        }

        fn ok(status_code: &str, status_message: &str, request_id: &str) -> Arc<Self> {
            Self::with_response(Ok(response_with_status(
                status_code,
                status_message,
                request_id,
            )))
        }

        fn unhealthy() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(Vec::new()),
                healthy: false,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_request(&self) -> SendSmsRequest {
            self.requests
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("transport was called")
        }
    }

    impl SmsTransport for StubTransport {
        fn send_sms(
            &self,
            _config: Arc<TencentSmsConfig>,
            request: SendSmsRequest,
        ) -> BoxFuture<'_, SendSmsResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            let response = self.responses.lock().unwrap().pop();
            Box::pin(async move {
                response.unwrap_or_else(|| Ok(response_with_status("Ok", "", "stub")))
            })
        }

        fn healthcheck(&self, _config: &TencentSmsConfig) -> Result<(), TransportError> {
            if self.healthy {
                Ok(())
            } else {
                Err(TransportError::ConfigError("client unavailable".to_string()))
            }
        }
    }

    fn valid_config() -> TencentSmsConfig {
        TencentSmsConfig {
            secret_id: "AKIDtest".to_string(),
            secret_key: "secret-value-123".to_string(),
            region_id: "ap-guangzhou".to_string(),
            sdk_app_id: "1400000001".to_string(),
            sign_name: "TestSign".to_string(),
            timeout_seconds: 30,
            templates: SmsTemplates {
                verification: "900001".to_string(),
                notification: "900002".to_string(),
                marketing: "900003".to_string(),
            },
        }
    }

    fn batch_phones(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("138{i:08}")).collect()
    }

    // --- validate_config ---

    #[test]
    fn validate_config_passes_for_complete_config() {
        let service = TencentSmsService::new(valid_config(), StubTransport::ok("Ok", "", "req-1"));
        let validation = service.validate_config();
        assert!(validation.valid);
        assert!(validation.errors.is_empty());
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn validate_config_reports_missing_fields_in_fixed_order() {
        let service = TencentSmsService::new(
            TencentSmsConfig::default(),
            StubTransport::ok("Ok", "", "req-1"),
        );
        let validation = service.validate_config();
        assert!(!validation.valid);
        assert_eq!(
            validation.errors,
            vec![
                "secret_id must not be empty",
                "secret_key must not be empty",
                "sdk_app_id must not be empty",
                "sign_name must not be empty",
            ]
        );
    }

    #[test]
    fn validate_config_reports_single_missing_field() {
        let mut config = valid_config();
        config.sign_name.clear();
        let service = TencentSmsService::new(config, StubTransport::ok("Ok", "", "req-1"));
        let validation = service.validate_config();
        assert_eq!(validation.errors, vec!["sign_name must not be empty"]);
    }

    // --- send ---

    #[tokio::test]
    async fn send_normalizes_a_successful_response() {
        let transport = StubTransport::ok("Ok", "", "req-1");
        let service = TencentSmsService::new(valid_config(), transport.clone());

        let outcome = service
            .send("13800138000", "10001", vec!["hello".to_string()])
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "sent successfully");
        assert_eq!(outcome.request_id.as_deref(), Some("req-1"));
        assert!(outcome.data.is_some());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn send_builds_the_vendor_payload() {
        let transport = StubTransport::ok("Ok", "", "req-1");
        let service = TencentSmsService::new(valid_config(), transport.clone());

        service
            .send(
                "13800138000",
                "10001",
                vec!["a".to_string(), "b".to_string()],
            )
            .await;

        let request = transport.last_request();
        assert_eq!(request.sms_sdk_app_id, "1400000001");
        assert_eq!(request.sign_name, "TestSign");
        assert_eq!(request.template_id, "10001");
        assert_eq!(request.phone_number_set, vec!["13800138000"]);
        assert_eq!(request.template_param_set, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn send_surfaces_a_vendor_delivery_failure() {
        let transport = StubTransport::ok("FailedOperation.ContainSensitiveWord", "blocked", "req-2");
        let service = TencentSmsService::new(valid_config(), transport);

        let outcome = service.send("13800138000", "10001", Vec::new()).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("blocked"));
        assert_eq!(outcome.request_id.as_deref(), Some("req-2"));
    }

    #[tokio::test]
    async fn send_with_invalid_config_skips_the_transport() {
        let mut config = valid_config();
        config.secret_id.clear();
        let transport = StubTransport::ok("Ok", "", "req-1");
        let service = TencentSmsService::new(config, transport.clone());

        let outcome = service.send("13800138000", "10001", Vec::new()).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("secret_id"));
        assert!(outcome.data.is_none());
        assert!(outcome.request_id.is_none());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn send_rejects_an_empty_template_id() {
        let transport = StubTransport::ok("Ok", "", "req-1");
        let service = TencentSmsService::new(valid_config(), transport.clone());

        let outcome = service.send("13800138000", "", Vec::new()).await;

        assert!(!outcome.success);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn send_converts_a_transport_error_into_a_failure_envelope() {
        let transport = StubTransport::with_response(Err(TransportError::ApiError {
            code: "AuthFailure.SignatureFailure".to_string(),
            message: "signature mismatch".to_string(),
        }));
        let service = TencentSmsService::new(valid_config(), transport);

        let outcome = service.send("13800138000", "10001", Vec::new()).await;

        assert!(!outcome.success);
        assert!(outcome.message.contains("signature mismatch"));
        assert!(outcome.data.is_none());
        assert!(outcome.request_id.is_none());
    }

    #[tokio::test]
    async fn send_treats_a_missing_status_entry_as_failure() {
        let transport = StubTransport::with_response(Ok(SendSmsResponse {
            send_status_set: Vec::new(),
            request_id: "req-3".to_string(),
        }));
        let service = TencentSmsService::new(valid_config(), transport);

        let outcome = service.send("13800138000", "10001", Vec::new()).await;

        assert!(!outcome.success);
    }

    // --- send_verification ---

    #[tokio::test]
    async fn send_verification_without_a_template_short_circuits() {
        let mut config = valid_config();
        config.templates.verification.clear();
        let transport = StubTransport::ok("Ok", "", "req-1");
        let service = TencentSmsService::new(config, transport.clone());

        let outcome = service.send_verification("13800138000", "1234", 10).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, "verification template not configured");
        assert!(outcome.data.is_none());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn send_verification_orders_code_before_expiry() {
        let transport = StubTransport::ok("Ok", "", "req-1");
        let service = TencentSmsService::new(valid_config(), transport.clone());

        let outcome = service.send_verification("13800138000", "1234", 5).await;

        assert!(outcome.success);
        let request = transport.last_request();
        assert_eq!(request.template_id, "900001");
        assert_eq!(request.template_param_set, vec!["1234", "5"]);
    }

    // --- send_notification ---

    #[tokio::test]
    async fn send_notification_delegates_to_send() {
        let transport = StubTransport::ok("Ok", "", "req-4");
        let service = TencentSmsService::new(valid_config(), transport.clone());

        let outcome = service
            .send_notification("13800138000", "900002", vec!["order-42".to_string()])
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.request_id.as_deref(), Some("req-4"));
        let request = transport.last_request();
        assert_eq!(request.template_id, "900002");
        assert_eq!(request.template_param_set, vec!["order-42"]);
    }

    // --- send_batch ---

    #[tokio::test]
    async fn send_batch_sends_the_full_phone_list() {
        let transport = StubTransport::ok("Ok", "", "req-5");
        let service = TencentSmsService::new(valid_config(), transport.clone());
        let phones = batch_phones(3);

        let outcome = service.send_batch(&phones, "10001", Vec::new()).await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "batch send completed");
        assert_eq!(transport.last_request().phone_number_set, phones);
    }

    #[tokio::test]
    async fn send_batch_succeeds_on_a_shorter_status_list_than_phones() {
        // Vendor acknowledgement is list non-emptiness, not a per-number
        // count match. A partial status list still counts as overall success.
        let transport = StubTransport::ok("Ok", "", "req-6");
        let service = TencentSmsService::new(valid_config(), transport.clone());
        let phones = batch_phones(5);

        let outcome = service.send_batch(&phones, "10001", Vec::new()).await;

        assert!(outcome.success);
        assert_eq!(transport.last_request().phone_number_set.len(), 5);
    }

    #[tokio::test]
    async fn send_batch_fails_on_an_empty_status_list() {
        let transport = StubTransport::with_response(Ok(SendSmsResponse {
            send_status_set: Vec::new(),
            request_id: "req-7".to_string(),
        }));
        let service = TencentSmsService::new(valid_config(), transport);

        let outcome = service
            .send_batch(&batch_phones(2), "10001", Vec::new())
            .await;

        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn send_batch_rejects_an_empty_phone_list() {
        let transport = StubTransport::ok("Ok", "", "req-1");
        let service = TencentSmsService::new(valid_config(), transport.clone());

        let outcome = service.send_batch(&[], "10001", Vec::new()).await;

        assert!(!outcome.success);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn send_batch_rejects_an_oversize_phone_list() {
        let transport = StubTransport::ok("Ok", "", "req-1");
        let service = TencentSmsService::new(valid_config(), transport.clone());

        let outcome = service
            .send_batch(&batch_phones(101), "10001", Vec::new())
            .await;

        assert!(!outcome.success);
        assert_eq!(transport.call_count(), 0);
    }

    // --- test_connection ---

    #[test]
    fn test_connection_reports_healthy_with_valid_config() {
        let service = TencentSmsService::new(valid_config(), StubTransport::ok("Ok", "", "req-1"));

        let outcome = service.test_connection();

        assert!(outcome.success);
        assert!(outcome.message.contains("connection healthy"));
        let data = outcome.data.expect("probe data");
        assert_eq!(data["region_id"], "ap-guangzhou");
        assert_eq!(data["sdk_app_id"], "1400000001");
        assert_eq!(data["sign_name"], "TestSign");
    }

    #[test]
    fn test_connection_fails_on_invalid_config() {
        let service = TencentSmsService::new(
            TencentSmsConfig::default(),
            StubTransport::ok("Ok", "", "req-1"),
        );

        let outcome = service.test_connection();

        assert!(!outcome.success);
        assert!(outcome.message.contains("secret_id"));
    }

    #[test]
    fn test_connection_fails_when_the_transport_cannot_build_a_client() {
        let service = TencentSmsService::new(valid_config(), StubTransport::unhealthy());

        let outcome = service.test_connection();

        assert!(!outcome.success);
        assert!(outcome.message.contains("client unavailable"));
    }

    // --- get_config / set_config ---

    #[test]
    fn get_config_never_exposes_credentials() {
        let service = TencentSmsService::new(valid_config(), StubTransport::ok("Ok", "", "req-1"));

        let snapshot = service.get_config();
        let rendered = serde_json::to_string(&snapshot).unwrap();

        assert!(!rendered.contains("secret-value-123"));
        assert!(!rendered.contains("AKIDtest"));
        assert!(rendered.contains("ap-guangzhou"));
    }

    #[test]
    fn get_config_is_an_exact_projection_of_the_held_config() {
        let config = valid_config();
        let service = TencentSmsService::new(config.clone(), StubTransport::ok("Ok", "", "req-1"));

        let snapshot = service.get_config();

        assert_eq!(snapshot.region_id, config.region_id);
        assert_eq!(snapshot.sdk_app_id, config.sdk_app_id);
        assert_eq!(snapshot.sign_name, config.sign_name);
        assert_eq!(snapshot.timeout_seconds, config.timeout_seconds);
    }

    #[test]
    fn set_config_merges_only_the_given_fields() {
        let service = TencentSmsService::new(valid_config(), StubTransport::ok("Ok", "", "req-1"));

        service.set_config(ConfigPatch {
            sign_name: Some("NewSign".to_string()),
            ..ConfigPatch::default()
        });

        let snapshot = service.get_config();
        assert_eq!(snapshot.sign_name, "NewSign");
        assert_eq!(snapshot.region_id, "ap-guangzhou");
        assert_eq!(snapshot.timeout_seconds, 30);
    }

    #[tokio::test]
    async fn set_config_affects_subsequent_sends() {
        let transport = StubTransport::ok("Ok", "", "req-8");
        let service = TencentSmsService::new(valid_config(), transport.clone());

        service.set_config(ConfigPatch {
            sdk_app_id: Some("1400000002".to_string()),
            ..ConfigPatch::default()
        });
        service.send("13800138000", "10001", Vec::new()).await;

        assert_eq!(transport.last_request().sms_sdk_app_id, "1400000002");
    }
}
