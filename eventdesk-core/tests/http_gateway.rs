use eventdesk_core::demo;
use eventdesk_core::error::GatewayError;
use eventdesk_core::gateway::{EventGateway, HttpGateway};
use eventdesk_core::{EventPatch, Importance, NewEvent};

use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use serde_json::json;
use url::Url;

fn gateway_for(server: &Server) -> HttpGateway {
    HttpGateway::new(Url::parse(&server.url()).unwrap())
}

#[tokio::test]
async fn test_list_normalizes_items() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/events/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "items": [
                    {"id": "1", "name": "Launch", "at": "2024-01-01T10:00:00Z", "importance": "haute"},
                    {"id": "2", "name": "Retro", "at": "2024-02-20T14:30:00Z"}
                ],
                "total": 2
            })
            .to_string(),
        )
        .create_async()
        .await;

    let events = gateway_for(&server).list().await;

    mock.assert_async().await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "1");
    assert_eq!(events[0].title, "Launch");
    assert_eq!(events[0].date_iso(), "2024-01-01T10:00:00.000Z");
    assert_eq!(events[0].importance, Importance::Haute);
    assert_eq!(events[1].importance, Importance::Normale);
}

#[tokio::test]
async fn test_list_absorbs_http_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/events/")
        .with_status(500)
        .create_async()
        .await;

    let gateway = gateway_for(&server);

    assert!(gateway.list().await.is_empty());
    assert_eq!(
        gateway.fetch_all().await,
        Err(GatewayError::ListFailed("Internal Server Error".to_string()))
    );
}

#[tokio::test]
async fn test_list_absorbs_malformed_payload() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/events/")
        .with_status(200)
        .with_body(r#"{"data": "nope"}"#)
        .create_async()
        .await;

    let gateway = gateway_for(&server);

    assert!(gateway.list().await.is_empty());
    assert_eq!(gateway.fetch_all().await, Err(GatewayError::MalformedList));
}

#[tokio::test]
async fn test_list_absorbs_transport_failure() {
    // Nothing listens on port 1
    let gateway = HttpGateway::new(Url::parse("http://127.0.0.1:1/api").unwrap());

    assert!(gateway.list().await.is_empty());
    assert!(matches!(
        gateway.fetch_all().await,
        Err(GatewayError::Transport(_))
    ));
}

#[tokio::test]
async fn test_create_sends_wire_shape() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/events/")
        .match_body(Matcher::Json(json!({
            "name": "New Event",
            "importance": "critique",
            "at": "2023-03-10T09:00:00.000Z"
        })))
        .with_status(201)
        .with_body(
            json!({"id": "3", "name": "New Event", "at": "2023-03-10T09:00:00Z", "importance": "critique"})
                .to_string(),
        )
        .create_async()
        .await;

    let draft = NewEvent::new("New Event", Utc.with_ymd_and_hms(2023, 3, 10, 9, 0, 0).unwrap())
        .with_importance(Importance::Critique);
    let created = gateway_for(&server).create(&draft).await.unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, "3");
    assert_eq!(created.title, "New Event");
    assert_eq!(created.date, draft.date);
}

#[tokio::test]
async fn test_create_failure_is_raised() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/events/")
        .with_status(400)
        .with_body(r#"{"detail": "Invalid data"}"#)
        .create_async()
        .await;

    let draft = NewEvent::new("Bad Event", Utc::now());
    let result = gateway_for(&server).create(&draft).await;

    assert_eq!(
        result,
        Err(GatewayError::CreateFailed("Bad Request".to_string()))
    );
}

#[tokio::test]
async fn test_get_by_id_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/events/42")
        .with_status(404)
        .with_body(r#"{"detail": "Not found"}"#)
        .create_async()
        .await;

    let result = gateway_for(&server).get_by_id("42").await;

    assert_eq!(result, Err(GatewayError::NotFound("42".to_string())));
}

#[tokio::test]
async fn test_update_without_date_omits_at() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/events/1")
        .match_body(Matcher::Json(json!({"name": "Launch v2"})))
        .with_status(200)
        .with_body(
            json!({"id": "1", "name": "Launch v2", "at": "2024-01-01T10:00:00Z", "importance": "haute"})
                .to_string(),
        )
        .create_async()
        .await;

    let patch = EventPatch {
        title: Some("Launch v2".to_string()),
        ..Default::default()
    };
    let updated = gateway_for(&server).update("1", &patch).await.unwrap();

    mock.assert_async().await;
    assert_eq!(updated.title, "Launch v2");
    assert_eq!(updated.date_iso(), "2024-01-01T10:00:00.000Z");
}

#[tokio::test]
async fn test_update_failure_is_raised() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/events/1")
        .with_status(404)
        .create_async()
        .await;

    let result = gateway_for(&server)
        .update("1", &EventPatch::default())
        .await;

    assert_eq!(
        result,
        Err(GatewayError::UpdateFailed("Not Found".to_string()))
    );
}

#[tokio::test]
async fn test_delete_returns_only_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/events/1")
        .with_status(204)
        .create_async()
        .await;

    let deleted = gateway_for(&server).delete("1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(deleted.id, "1");
}

#[tokio::test]
async fn test_delete_failure_is_raised() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/events/missing")
        .with_status(404)
        .create_async()
        .await;

    let result = gateway_for(&server).delete("missing").await;

    assert_eq!(
        result,
        Err(GatewayError::DeleteFailed("Not Found".to_string()))
    );
}

#[tokio::test]
async fn test_demo_events_write_nothing_to_server() {
    let mut server = Server::new_async().await;
    let writes = server
        .mock("POST", Matcher::Any)
        .with_status(500)
        .expect(0)
        .create_async()
        .await;

    let first = gateway_for(&server).demo_events().await.unwrap();
    let second = gateway_for(&server).demo_events().await.unwrap();

    writes.assert_async().await;
    assert_eq!(first, demo::demo_events());
    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(|e| e.importance.clone()).collect::<Vec<_>>(),
        Importance::KNOWN.to_vec()
    );
}
