use std::cell::RefCell;
use std::time::Duration;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::testing::{MockTransport, RecordingNotifier};
use crate::state::notify::Severity;
use crate::state::session::{MemoryStore, SessionStore, TOKEN_KEY, USER_KEY, UserProfile};

struct Harness {
    pipeline: RequestPipeline<MockTransport>,
    transport: MockTransport,
    notifier: RecordingNotifier,
    store: MemoryStore,
    events: Rc<RefCell<Vec<SessionEvent>>>,
}

fn harness(config: ApiConfig) -> Harness {
    let transport = MockTransport::new();
    let notifier = RecordingNotifier::default();
    let store = MemoryStore::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let pipeline = RequestPipeline::new(config, transport.clone(), Session::new(store.clone()), notifier.clone())
        .on_session_event(move |e| sink.borrow_mut().push(e));
    Harness { pipeline, transport, notifier, store, events }
}

fn signed_in(config: ApiConfig) -> Harness {
    let h = harness(config);
    h.pipeline.session().sign_in("tok-1", &UserProfile::with_role("user"));
    h
}

// =============================================================
// Outbound stage
// =============================================================

#[test]
fn outbound_attaches_bearer_token_when_stored() {
    let h = signed_in(ApiConfig::default());
    let req = h.pipeline.outbound(Method::Post, "/api/predict", None);
    assert_eq!(req.header("authorization"), Some("Bearer tok-1"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
}

#[test]
fn outbound_without_token_sends_no_authorization() {
    let h = harness(ApiConfig::default());
    let req = h.pipeline.outbound(Method::Get, "/api/predict", None);
    assert!(req.header("Authorization").is_none());
}

#[test]
fn outbound_uses_config_url_timeout_and_credentials() {
    let cfg = ApiConfig::from_values(Some("https://api.test"), Some("5000"), None).unwrap();
    let h = harness(cfg);
    let body = json!({"text": "x"});
    let req = h.pipeline.outbound(Method::Post, "/api/predict", Some(&body));
    assert_eq!(req.url, "https://api.test/api/predict");
    assert_eq!(req.timeout, Duration::from_millis(5000));
    assert!(req.with_credentials);
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.body.as_deref(), Some(r#"{"text":"x"}"#));
}

// =============================================================
// Inbound stage: success
// =============================================================

#[test]
fn success_codes_resolve_without_side_effects() {
    for code in [0, 200] {
        let h = signed_in(ApiConfig::default());
        h.transport.reply(200, json!({"code": code, "data": {"label": "neutral"}}));

        let value = block_on(h.pipeline.get("/api/x")).unwrap();

        assert_eq!(value, json!({"code": code, "data": {"label": "neutral"}}));
        assert!(h.notifier.notifications().is_empty());
        assert!(h.events.borrow().is_empty());
        assert!(h.store.get(TOKEN_KEY).is_some());
    }
}

#[test]
fn whole_float_success_code_resolves() {
    let h = signed_in(ApiConfig::default());
    h.transport.reply(200, json!({"code": 200.0, "data": {"label": "neutral"}}));

    let value = block_on(h.pipeline.get("/api/x")).unwrap();

    assert_eq!(value["data"], json!({"label": "neutral"}));
    assert!(h.notifier.notifications().is_empty());
    assert!(h.store.get(TOKEN_KEY).is_some());
}

#[test]
fn data_shape_resolves_with_data_only() {
    let h = harness(ApiConfig::default().with_response_shape(ResponseShape::Data));
    h.transport.reply(200, json!({"code": 200, "message": "ok", "data": [1, 2]}));

    let value = block_on(h.pipeline.get("/api/x")).unwrap();

    assert_eq!(value, json!([1, 2]));
}

#[test]
fn envelope_shape_preserves_extra_fields() {
    let h = harness(ApiConfig::default());
    h.transport.reply(200, json!({"code": 0, "data": null, "trace_id": "t-9"}));

    let value = block_on(h.pipeline.get("/api/x")).unwrap();

    assert_eq!(value["trace_id"], json!("t-9"));
}

// =============================================================
// Inbound stage: auth expiry
// =============================================================

#[test]
fn code_401_clears_identity_and_emits_auth_expired() {
    let h = signed_in(ApiConfig::default());
    h.transport.reply(200, json!({"code": 401, "message": "登录已过期"}));

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert_eq!(err, ApiError::AuthExpired { message: "登录已过期".to_owned() });
    assert!(h.store.get(TOKEN_KEY).is_none());
    assert!(h.store.get(USER_KEY).is_none());
    assert_eq!(*h.events.borrow(), vec![SessionEvent::AuthExpired]);
    let seen = h.notifier.notifications();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "登录已过期");
    assert_eq!(seen[0].duration, Duration::from_millis(5000));
}

#[test]
fn code_401_with_non_string_message_still_tears_down() {
    let h = signed_in(ApiConfig::default());
    h.transport.reply(200, json!({"code": 401, "message": {"detail": "expired"}}));

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert_eq!(err, ApiError::AuthExpired { message: "Error".to_owned() });
    assert!(h.store.get(TOKEN_KEY).is_none());
    assert!(h.store.get(USER_KEY).is_none());
    assert_eq!(*h.events.borrow(), vec![SessionEvent::AuthExpired]);
    assert_eq!(h.notifier.notifications().len(), 1);
}

#[test]
fn code_401_without_message_uses_default() {
    let h = signed_in(ApiConfig::default());
    h.transport.reply(200, json!({"code": 401}));

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert_eq!(err.user_message(), "Error");
    assert!(err.is_auth_expired());
}

#[test]
fn http_401_status_is_treated_as_auth_expiry() {
    let h = signed_in(ApiConfig::default());
    h.transport.reply_raw(401, "");

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert!(err.is_auth_expired());
    assert!(h.pipeline.session().token().is_none());
    assert_eq!(h.events.borrow().len(), 1);
}

// =============================================================
// Inbound stage: application and transport failures
// =============================================================

#[test]
fn other_codes_reject_and_notify_once() {
    let h = signed_in(ApiConfig::default());
    h.transport.reply(200, json!({"code": 500, "message": "模型服务不可用"}));

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert_eq!(err, ApiError::Application { code: Some(500), message: "模型服务不可用".to_owned() });
    let seen = h.notifier.notifications();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "模型服务不可用");
    assert_eq!(seen[0].severity, Severity::Error);
    assert_eq!(seen[0].duration, Duration::from_millis(5000));
    assert!(h.events.borrow().is_empty());
    assert!(h.store.get(TOKEN_KEY).is_some());
}

#[test]
fn other_codes_without_message_notify_error() {
    let h = harness(ApiConfig::default());
    h.transport.reply(200, json!({"code": 1}));

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert_eq!(err.user_message(), "Error");
    assert_eq!(h.notifier.notifications()[0].message, "Error");
}

#[test]
fn non_envelope_body_is_application_error() {
    let h = harness(ApiConfig::default());
    h.transport.reply_raw(200, "<html>oops</html>");

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert_eq!(err, ApiError::Application { code: None, message: "Error".to_owned() });
    assert_eq!(h.notifier.notifications().len(), 1);
}

#[test]
fn transport_failure_notifies_with_its_message() {
    let h = harness(ApiConfig::default());
    h.transport.fail(TransportError::Timeout(Duration::from_millis(15_000)));

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert!(matches!(err, ApiError::Transport(TransportError::Timeout(_))));
    let seen = h.notifier.notifications();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "timeout of 15000ms exceeded");
}

#[test]
fn transport_failure_without_message_uses_request_failed() {
    let h = harness(ApiConfig::default());
    h.transport.fail(TransportError::Network(String::new()));

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert_eq!(err.user_message(), "请求失败");
    assert_eq!(h.notifier.notifications()[0].message, "请求失败");
}

#[test]
fn non_2xx_status_is_transport_failure() {
    let h = signed_in(ApiConfig::default());
    h.transport.reply(500, json!({"code": 500, "message": "ignored"}));

    let err = block_on(h.pipeline.get("/api/x")).unwrap_err();

    assert_eq!(err, ApiError::Transport(TransportError::Status(500)));
    assert_eq!(h.notifier.notifications().len(), 1);
    assert!(h.store.get(TOKEN_KEY).is_some());
}

#[test]
fn post_serializes_body_and_sends_once() {
    let h = harness(ApiConfig::default());
    h.transport.reply(200, json!({"code": 0}));

    block_on(h.pipeline.post("/api/feedback", &json!({"record_id": 3, "is_correct": true}))).unwrap();

    let sent = h.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Post);
    let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"record_id": 3, "is_correct": true}));
}
