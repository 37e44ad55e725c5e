use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use messaging_broadcast::{
    application::{
        handlers::broadcast_dispatcher::DispatchConfig,
        services::messenger::{MessengerClient, ProviderReply},
        usecases::start_broadcast::{StartBroadcastConfig, StartBroadcastUseCase},
    },
    domain::models::OutboundMessage,
    presentation::http::{build_app, endpoints::root::ApiState},
};
use poem::{Route, http::StatusCode, test::TestClient};
use serde_json::{Value, json};

#[derive(Default)]
struct FakeTelegram {
    sent: Mutex<Vec<(String, OutboundMessage)>>,
}

impl FakeTelegram {
    fn recipients(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(r, _)| r.clone()).collect()
    }
}

#[async_trait]
impl MessengerClient for FakeTelegram {
    async fn send(
        &self,
        recipient: &str,
        message: &OutboundMessage,
    ) -> anyhow::Result<ProviderReply> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), message.clone()));
        if recipient == "404" {
            return Ok(ProviderReply::rejected(400, Some(400), Some("chat not found")));
        }
        Ok(ProviderReply::accepted())
    }
}

fn instant_config() -> StartBroadcastConfig {
    StartBroadcastConfig {
        dispatch: DispatchConfig {
            batch_size: 2,
            stagger: Duration::ZERO,
            batch_pause: Duration::ZERO,
        },
        progress_buffer: 4,
    }
}

fn app(client: Option<Arc<dyn MessengerClient>>) -> Route {
    let state = Arc::new(ApiState {
        start_broadcast_usecase: Arc::new(StartBroadcastUseCase::new(client, instant_config())),
    });
    build_app(state, "http://localhost:3000")
}

fn sse_payloads(body: &str) -> Vec<Value> {
    body.split("\n\n")
        .filter_map(|event| {
            event
                .lines()
                .find_map(|line| line.strip_prefix("data: "))
                .map(|data| serde_json::from_str(data).unwrap())
        })
        .collect()
}

#[tokio::test]
async fn health_returns_ok() {
    let cli = TestClient::new(app(None));
    let resp = cli.get("/api/health").send().await;
    resp.assert_status_is_ok();
    resp.assert_text("OK").await;
}

#[tokio::test]
async fn streams_one_event_per_batch() {
    let telegram = Arc::new(FakeTelegram::default());
    let cli = TestClient::new(app(Some(telegram.clone())));

    let resp = cli
        .post("/api/broadcast")
        .header("Accept", "text/event-stream")
        .body_json(&json!({
            "message": "hi",
            "buttons": [{"text": "Open", "url": "https://example.com"}],
            "users": ["1", "404", "3"]
        }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = resp.0.into_body().into_string().await.unwrap();
    let events = sse_payloads(&body);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event"], "progress");
    assert_eq!(events[0]["totalProcessed"], 2);
    assert_eq!(events[0]["processedBatches"], 1);
    assert_eq!(events[0]["failedIds"], json!(["404: chat not found"]));

    let last = &events[1];
    assert_eq!(last["successful"], 2);
    assert_eq!(last["failed"], 1);
    assert_eq!(last["totalProcessed"], 3);
    assert_eq!(last["totalUsers"], 3);
    assert_eq!(last["totalBatches"], 2);
    assert!(last.get("error").is_none());

    assert_eq!(telegram.recipients(), vec!["1", "404", "3"]);
}

#[tokio::test]
async fn without_event_stream_accepts_and_runs_detached() {
    let telegram = Arc::new(FakeTelegram::default());
    let cli = TestClient::new(app(Some(telegram.clone())));

    let resp = cli
        .post("/api/broadcast")
        .body_json(&json!({
            "message": "hi",
            "imageUrl": "https://img.example/a.png",
            "users": ["1", "2", "3"]
        }))
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_content_type("application/json; charset=utf-8");
    let json = resp.json().await;
    let body = json.value().object();
    body.get("success").assert_bool(true);
    assert!(
        chrono::DateTime::parse_from_rfc3339(body.get("startedAt").string()).is_ok(),
        "startedAt should be an RFC 3339 timestamp"
    );
    body.get("message").assert_string("Broadcast started");
    body.get("totalUsers").assert_i64(3);
    body.get("totalBatches").assert_i64(2);

    for _ in 0..100 {
        if telegram.recipients().len() == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(telegram.recipients().len(), 3);
}

#[tokio::test]
async fn empty_users_is_bad_request_before_any_send() {
    let telegram = Arc::new(FakeTelegram::default());
    let cli = TestClient::new(app(Some(telegram.clone())));

    let resp = cli
        .post("/api/broadcast")
        .header("Accept", "text/event-stream")
        .body_json(&json!({"message": "hi", "users": []}))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json = resp.json().await;
    json.value().object().get("success").assert_bool(false);
    json.value()
        .object()
        .get("error")
        .assert_string("Message and users are required");
    assert!(telegram.recipients().is_empty());
}

#[tokio::test]
async fn missing_message_is_json_bad_request() {
    let telegram = Arc::new(FakeTelegram::default());
    let cli = TestClient::new(app(Some(telegram.clone())));

    let resp = cli
        .post("/api/broadcast")
        .body_json(&json!({"users": ["1"]}))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_content_type("application/json; charset=utf-8");
    let json = resp.json().await;
    json.value().object().get("success").assert_bool(false);
    json.value()
        .object()
        .get("error")
        .assert_string("Message and users are required");
    assert!(telegram.recipients().is_empty());
}

#[tokio::test]
async fn missing_users_is_json_bad_request() {
    let cli = TestClient::new(app(Some(Arc::new(FakeTelegram::default()))));

    let resp = cli
        .post("/api/broadcast")
        .header("Accept", "text/event-stream")
        .body_json(&json!({"message": "hi", "users": null}))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.json()
        .await
        .value()
        .object()
        .get("error")
        .assert_string("Message and users are required");
}

#[tokio::test]
async fn missing_token_is_internal_error() {
    let cli = TestClient::new(app(None));

    let resp = cli
        .post("/api/broadcast")
        .body_json(&json!({"message": "hi", "users": ["1"]}))
        .send()
        .await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    resp.json()
        .await
        .value()
        .object()
        .get("error")
        .assert_string("Telegram bot token not configured");
}

#[tokio::test]
async fn categorizes_failure_strings() {
    let cli = TestClient::new(app(None));

    let resp = cli
        .post("/api/broadcast/errors/categorize")
        .body_json(&json!({
            "failedIds": [
                "42: Bot was blocked by the user",
                "7: rate limit: exceeded",
                "8: rate limit: exceeded"
            ]
        }))
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_json(json!({
        "categories": [
            {"errorMessage": "Bot was blocked by the user", "userIds": ["42"]},
            {"errorMessage": "rate limit: exceeded", "userIds": ["7", "8"]}
        ]
    }))
    .await;
}

#[tokio::test]
async fn parses_manual_recipient_entry() {
    let cli = TestClient::new(app(None));

    let resp = cli
        .post("/api/recipients/parse")
        .body_json(&json!({"format": "comma", "content": " 11, 22 ,,33"}))
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_json(json!({"users": ["11", "22", "33"], "count": 3}))
        .await;
}
