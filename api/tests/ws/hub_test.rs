#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, spawn_server};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header},
    };
    use futures_util::{Stream, StreamExt};
    use serde_json::{Value, json};
    use std::time::Duration;
    use tokio::time::{sleep, timeout};
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::protocol::Message;
    use tower::ServiceExt;
    use util::ws::Hub;

    /// The server subscribes after the upgrade completes, so wait for it.
    async fn wait_for_subscribers(hub: &Hub, n: usize) {
        for _ in 0..100 {
            if hub.subscriber_count() >= n {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {n} hub subscribers, found {}", hub.subscriber_count());
    }

    async fn next_event<S>(ws: &mut S) -> Value
    where
        S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
    {
        loop {
            let frame = timeout(Duration::from_secs(2), ws.next())
                .await
                .expect("timed out waiting for frame")
                .expect("socket closed")
                .expect("socket error");
            if let Message::Text(txt) = frame {
                return serde_json::from_str(txt.as_str()).unwrap();
            }
        }
    }

    #[tokio::test]
    async fn clients_receive_published_events() {
        let app = make_test_app().await;
        let hub = app.state.hub().clone();
        let addr = spawn_server(app.router.clone()).await;

        let (mut first, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
        let (mut second, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
        wait_for_subscribers(&hub, 2).await;

        assert_eq!(hub.publish("newQueue", &json!({"no": "A001"})), 2);

        for ws in [&mut first, &mut second] {
            let event = next_event(ws).await;
            assert_eq!(event, json!({"event": "newQueue", "data": {"no": "A001"}}));
        }
    }

    #[tokio::test]
    async fn config_update_reaches_connected_clients() {
        let app = make_test_app().await;
        let hub = app.state.hub().clone();
        let addr = spawn_server(app.router.clone()).await;

        let (mut ws, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
        wait_for_subscribers(&hub, 1).await;

        let req = Request::builder()
            .method("PUT")
            .uri("/api/config/login-not-cmu")
            .header(header::CONTENT_TYPE, "application/json")
            .body(AxumBody::from(r#"{"loginNotCmu": false}"#))
            .unwrap();
        let response = app.router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let event = next_event(&mut ws).await;
        assert_eq!(event, json!({"event": "setLoginNotCmu", "data": false}));
    }

    #[tokio::test]
    async fn closing_client_unsubscribes() {
        let app = make_test_app().await;
        let hub = app.state.hub().clone();
        let addr = spawn_server(app.router.clone()).await;

        let (mut ws, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
        wait_for_subscribers(&hub, 1).await;

        ws.close(None).await.unwrap();

        for _ in 0..100 {
            if hub.subscriber_count() == 0 {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("subscriber still registered after close");
    }
}
