use api::{auth::middleware::log_request, routes::routes, state::AppState, ws::ws_routes};
use axum::{Router, body::Body, http::Response, middleware::from_fn_with_state};
use db::test_utils::setup_test_db;
use serde_json::Value;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use util::config::{AppConfig, OAuthSettings};
use wiremock::MockServer;

pub const JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    /// Stands in for the CMU OAuth provider.
    pub oauth: MockServer,
}

fn test_config(oauth: &MockServer) -> AppConfig {
    AppConfig {
        env: "test".into(),
        project_name: "cmu-queue".into(),
        log_level: "api=debug".into(),
        log_file: "api.log".into(),
        log_to_stdout: false,
        database_path: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        jwt_duration_minutes: None,
        oauth: OAuthSettings {
            token_url: format!("{}/v1/oauth2/token.aspx", oauth.uri()),
            profile_url: format!("{}/v1/misapi/basicinfo", oauth.uri()),
            client_id: "queue-client".into(),
            client_secret: "queue-secret".into(),
            timeout_secs: 5,
        },
    }
}

/// Router over a fresh in-memory database, with the OAuth provider mocked.
pub async fn make_test_app() -> TestApp {
    let oauth = MockServer::start().await;
    let db = setup_test_db().await;
    let state = AppState::new(db, &test_config(&oauth)).expect("Failed to build app state");

    let router = Router::new()
        .nest("/api", routes())
        .merge(ws_routes())
        .layer(from_fn_with_state(state.clone(), log_request))
        .with_state(state.clone());

    TestApp {
        router,
        state,
        oauth,
    }
}

pub async fn get_json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Serves `router` on a random local port.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    addr
}
