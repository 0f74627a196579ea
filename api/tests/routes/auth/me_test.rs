#[cfg(test)]
mod tests {
    use crate::helpers::{get_json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header},
    };
    use services::session::{SessionClaims, SessionScope, SessionSigner, SessionSubject};
    use tower::ServiceExt;

    fn me_request(token: Option<&str>) -> Request<AxumBody> {
        let mut builder = Request::builder().method("GET").uri("/api/auth/me");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(AxumBody::empty()).unwrap()
    }

    fn visitor_claims() -> SessionClaims {
        SessionClaims::build(
            SessionSubject::Manual {
                first_name: "Anan",
                last_name: "Dee",
            },
            SessionScope::Visitor,
        )
    }

    #[tokio::test]
    async fn returns_claims_of_valid_token() {
        let app = make_test_app().await;
        let token = app.state.signer().issue(&visitor_claims()).unwrap();

        let response = app.router.oneshot(me_request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["firstName"], "Anan");
        assert_eq!(json["data"]["lastName"], "Dee");
        assert!(json["data"].get("email").is_none());
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let app = make_test_app().await;

        let response = app.router.oneshot(me_request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_unauthorized() {
        let app = make_test_app().await;
        let token = SessionSigner::new("another-secret", None)
            .issue(&visitor_claims())
            .unwrap();

        let response = app.router.oneshot(me_request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn token_from_shared_secret_is_accepted() {
        let app = make_test_app().await;
        let token = SessionSigner::new(crate::helpers::app::JWT_SECRET, Some(60))
            .issue(&visitor_claims())
            .unwrap();

        let response = app.router.oneshot(me_request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert!(json["data"]["exp"].as_u64().is_some());
    }
}
