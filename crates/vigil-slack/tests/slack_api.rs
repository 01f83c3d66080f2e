use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use vigil_core::capabilities::MessageSource;
use vigil_slack::{SlackClient, SlackError};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> SlackClient {
    SlackClient::new("xoxb-test", &server.uri()).unwrap()
}

#[tokio::test]
async fn history_sends_window_and_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .and(header("authorization", "Bearer xoxb-test"))
        .and(query_param("channel", "C0123ABCDE"))
        .and(query_param("limit", "200"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "messages": [{"ts": "1712345678.000200", "user": "U1", "text": "https://a.example"}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let now = Utc::now();
    let page = client(&server)
        .await
        .fetch_history("C0123ABCDE", now - TimeDelta::days(7), now, Some("page2"))
        .await
        .unwrap();
    assert_eq!(page.messages.len(), 1);
    assert_eq!(page.messages[0].text, "https://a.example");
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn not_ok_envelope_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false, "error": "channel_not_found"})),
        )
        .mount(&server)
        .await;

    let now = Utc::now();
    let err = client(&server)
        .await
        .conversations_history("C0123ABCDE", now - TimeDelta::hours(1), now, None)
        .await
        .unwrap_err();
    assert_eq!(err.slack_code(), Some("channel_not_found"));
}

#[tokio::test]
async fn rate_limit_surfaces_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let now = Utc::now();
    let err = client(&server)
        .await
        .conversations_history("C0123ABCDE", now - TimeDelta::hours(1), now, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SlackError::RateLimited {
            retry_after_secs: 7
        }
    ));
}

#[tokio::test]
async fn already_reacted_counts_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reactions.add"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false, "error": "already_reacted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .await
        .add_marker("C0123ABCDE", "1.000001", "red_circle")
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_name_retries_with_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reactions.add"))
        .and(body_partial_json(json!({"name": "green_circle"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "invalid_name"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/reactions.add"))
        .and(body_partial_json(json!({"name": "large_green_circle"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .await
        .add_reaction("C0123ABCDE", "1.000001", "green_circle")
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_name_without_fallback_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reactions.add"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "invalid_name"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .add_reaction("C0123ABCDE", "1.000001", "made_up")
        .await
        .unwrap_err();
    assert_eq!(err.slack_code(), Some("invalid_name"));
}

#[tokio::test]
async fn reply_is_threaded_with_blocks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(body_partial_json(json!({
            "channel": "C0123ABCDE",
            "thread_ts": "1.000001",
            "text": "Link assessment for https://a.example",
            "blocks": [{"type": "divider"}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "ts": "2.000001"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let blocks = json!([{"type": "divider"}]);
    client(&server)
        .await
        .post_reply(
            "C0123ABCDE",
            "1.000001",
            "Link assessment for https://a.example",
            Some(&blocks),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn direct_message_to_email_looks_up_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users.lookupByEmail"))
        .and(query_param("email", "soc@example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "user": {"id": "U0SOC"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(body_partial_json(json!({"channel": "U0SOC", "text": "alert"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .await
        .send_direct("soc@example.com", "alert")
        .await
        .unwrap();
}

#[tokio::test]
async fn resolve_channel_walks_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(query_param("cursor", "next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [{"id": "C0THREAT01", "name": "threat-intel"}],
            "response_metadata": {"next_cursor": ""}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [{"id": "C0GENERAL1", "name": "general"}],
            "response_metadata": {"next_cursor": "next"}
        })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    assert_eq!(
        client.resolve_channel("#threat-intel").await.unwrap(),
        "C0THREAT01"
    );
    assert!(matches!(
        client.resolve_channel("missing").await.unwrap_err(),
        SlackError::ChannelNotFound(name) if name == "missing"
    ));
    assert_eq!(
        client.resolve_channel("C0ALREADY1").await.unwrap(),
        "C0ALREADY1"
    );
}

#[tokio::test]
async fn auth_test_returns_bot_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth.test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "user_id": "U0BOT"})),
        )
        .mount(&server)
        .await;

    assert_eq!(client(&server).await.auth_test().await.unwrap(), "U0BOT");
}
