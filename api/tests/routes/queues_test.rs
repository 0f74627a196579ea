#[cfg(test)]
mod tests {
    use crate::helpers::{TestApp, get_json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header},
    };
    use db::models::{queue, topic};
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use serde_json::{Value, json};
    use std::time::Duration;
    use tokio::time::timeout;
    use tower::ServiceExt;

    fn reserve_request(body: Value) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri("/api/queues/reserve")
            .header(header::CONTENT_TYPE, "application/json")
            .body(AxumBody::from(body.to_string()))
            .unwrap()
    }

    async fn stored_tickets(app: &TestApp, topic_id: i64) -> Vec<queue::Model> {
        queue::Entity::find()
            .filter(queue::Column::TopicId.eq(topic_id))
            .all(app.state.db())
            .await
            .unwrap()
    }

    async fn create_topic(app: &TestApp, code: &str) -> topic::Model {
        topic::Model::create(
            app.state.db(),
            &format!("หัวข้อ {code}"),
            &format!("Topic {code}"),
            code,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn reserves_sequential_numbers() {
        let app = make_test_app().await;
        let topic = create_topic(&app, "A").await;

        let mut numbers = Vec::new();
        for name in ["Anan", "Malee"] {
            let body = json!({"topic": topic.id, "firstName": name, "lastName": "Dee"});
            let response = app.router.clone().oneshot(reserve_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let json = get_json_body(response).await;
            assert_eq!(json["success"], true);
            assert_eq!(json["data"]["queue"]["firstName"], name);
            assert_eq!(json["data"]["queue"]["status"], "WAITING");
            numbers.push(json["data"]["queue"]["no"].as_str().unwrap().to_string());

            let claims = app
                .state
                .signer()
                .verify(json["data"]["token"].as_str().unwrap())
                .unwrap();
            assert_eq!(claims.first_name, name);
            assert_eq!(claims.last_name, "Dee");
            assert_eq!(claims.student_id, None);
        }

        assert_eq!(numbers, ["A001", "A002"]);
    }

    #[tokio::test]
    async fn note_is_stored() {
        let app = make_test_app().await;
        let topic = create_topic(&app, "B").await;

        let body = json!({"topic": topic.id, "firstName": "Anan", "lastName": "Dee", "note": "transcript"});
        let response = app.router.clone().oneshot(reserve_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = stored_tickets(&app, topic.id).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].note.as_deref(), Some("transcript"));
    }

    #[tokio::test]
    async fn reservation_is_broadcast() {
        let app = make_test_app().await;
        let topic = create_topic(&app, "A").await;
        let mut rx = app.state.hub().subscribe();

        let body = json!({"topic": topic.id, "firstName": "Anan", "lastName": "Dee"});
        let response = app.router.oneshot(reserve_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let msg = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let event: Value = serde_json::from_str(&msg).unwrap();
        assert_eq!(event["event"], "newQueue");
        assert_eq!(event["data"]["no"], "A001");
        assert_eq!(event["data"]["topicId"], topic.id);
    }

    #[tokio::test]
    async fn invalid_requests_are_rejected() {
        let app = make_test_app().await;
        let topic = create_topic(&app, "A").await;

        for body in [
            json!({"topic": topic.id, "lastName": "Dee"}),
            json!({"topic": topic.id, "firstName": "Anan", "lastName": ""}),
            json!({"topic": 0, "firstName": "Anan", "lastName": "Dee"}),
            json!({"firstName": "Anan", "lastName": "Dee"}),
            json!({"topic": "A", "firstName": "Anan", "lastName": "Dee"}),
        ] {
            let response = app.router.clone().oneshot(reserve_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let json = get_json_body(response).await;
            assert_eq!(json["message"], "Invalid firstname or lastname or topic");
        }

        assert!(stored_tickets(&app, topic.id).await.is_empty());
    }

    #[tokio::test]
    async fn unknown_topic_is_a_server_error() {
        let app = make_test_app().await;

        let body = json!({"topic": 999, "firstName": "Anan", "lastName": "Dee"});
        let response = app.router.oneshot(reserve_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Failed to retrieve topic code");
    }

    #[tokio::test]
    async fn unparseable_last_number_is_a_server_error() {
        let app = make_test_app().await;
        let topic = create_topic(&app, "A").await;
        queue::Model::create(app.state.db(), "X12", "Old", "Entry", topic.id, None)
            .await
            .unwrap();

        let body = json!({"topic": topic.id, "firstName": "Anan", "lastName": "Dee"});
        let response = app.router.oneshot(reserve_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Failed to parse the last queue number");
    }

    #[tokio::test]
    async fn number_that_stays_taken_is_a_conflict() {
        let app = make_test_app().await;
        let topic = create_topic(&app, "A").await;
        // A001 is the latest ticket but A002 is already issued.
        for no in ["A002", "A001"] {
            queue::Model::create(app.state.db(), no, "Old", "Entry", topic.id, None)
                .await
                .unwrap();
        }
        let mut rx = app.state.hub().subscribe();

        let body = json!({"topic": topic.id, "firstName": "Anan", "lastName": "Dee"});
        let response = app.router.clone().oneshot(reserve_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Queue number conflict, please retry");
        assert_eq!(stored_tickets(&app, topic.id).await.len(), 2);
        assert!(rx.try_recv().is_err());
    }
}
