//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use doorbridge_app::ports::{DatabaseConnector, HubTransport};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<T, C>(state: AppState<T, C>) -> Router
where
    T: HubTransport + 'static,
    C: DatabaseConnector + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HubTarget;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use doorbridge_app::ports::{
        DatabaseSession, HubResponse, PortError, SqlRow, SqlValue, TransportFailure,
    };
    use doorbridge_app::services::discovery::DoorDiscoveryService;
    use doorbridge_app::services::dispatcher::DoorCommandDispatcher;
    use doorbridge_app::services::doors::DoorService;
    use doorbridge_app::services::setup::SetupService;
    use doorbridge_domain::discovery::DatabaseCredentials;
    use doorbridge_domain::door::DoorRecord;
    use doorbridge_domain::hub::HubEndpoint;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::future::Future;
    use std::sync::Arc;
    use tower::ServiceExt;
    use url::Url;

    /// Answers every command with `status`, or fails when `status` is `None`.
    struct StubTransport {
        status: Option<u16>,
    }

    impl HubTransport for StubTransport {
        fn get(
            &self,
            _url: Url,
        ) -> impl Future<Output = Result<HubResponse, TransportFailure>> + Send {
            let reply = match self.status {
                Some(status) => Ok(HubResponse {
                    status,
                    body: "hub says no".into(),
                }),
                None => Err(TransportFailure::new("connection refused")),
            };
            async move { reply }
        }
    }

    /// A database holding doors 1 and 2, or refusing connections.
    struct StubConnector {
        reachable: bool,
    }

    struct StubSession;

    impl DatabaseConnector for StubConnector {
        type Session = StubSession;

        fn connect(
            &self,
            _credentials: &DatabaseCredentials,
        ) -> impl Future<Output = Result<StubSession, PortError>> + Send {
            let result = if self.reachable {
                Ok(StubSession)
            } else {
                Err(PortError::from("connection refused"))
            };
            async move { result }
        }
    }

    impl DatabaseSession for StubSession {
        fn query(
            &mut self,
            sql: &str,
        ) -> impl Future<Output = Result<Vec<SqlRow>, PortError>> + Send {
            let rows = if sql.contains("FROM Door") {
                [(1, "Front Door"), (2, "Garage")]
                    .into_iter()
                    .map(|(id, name)| {
                        SqlRow::new(vec![
                            ("DoorId".into(), SqlValue::Int(id)),
                            ("DoorName".into(), SqlValue::Text(name.into())),
                        ])
                    })
                    .collect()
            } else {
                Vec::new()
            };
            async move { Ok(rows) }
        }

        fn close(self) -> impl Future<Output = ()> + Send {
            async {}
        }
    }

    fn test_app(status: Option<u16>, reachable: bool) -> Router {
        let doors = DoorService::new(DoorCommandDispatcher::new(StubTransport { status }));
        let hub = Arc::new(HubEndpoint::new("hub.lan", 4960).unwrap());
        doors
            .register(
                &hub,
                vec![DoorRecord::builder()
                    .door_id("7")
                    .display_name("Front Door")
                    .build()
                    .unwrap()],
            )
            .unwrap();
        let setup = SetupService::new(DoorDiscoveryService::new(StubConnector { reachable }));
        build(AppState::from_arcs(
            Arc::new(doors),
            Arc::new(setup),
            HubTarget {
                host: "hub.lan".into(),
                port: Some(4960),
            },
        ))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn credentials() -> Value {
        json!({
            "host": "db.lan",
            "database": "access",
            "username": "reader",
            "password": "secret"
        })
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (status, _) = send(test_app(Some(200), true), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_list_registered_doors() {
        let (status, body) = send(test_app(Some(200), true), "GET", "/api/doors", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["unique_id"], "hub.lan:4960:7");
        assert_eq!(body[0]["display_name"], "Front Door");
        assert_eq!(body[0]["hub"], "hub.lan:4960");
    }

    #[tokio::test]
    async fn should_return_not_found_when_door_unknown() {
        let (status, body) = send(test_app(Some(200), true), "GET", "/api/doors/99", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Door 99 not found");
    }

    #[tokio::test]
    async fn should_list_four_actions_in_order() {
        let (status, body) =
            send(test_app(Some(200), true), "GET", "/api/doors/7/actions", None).await;

        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|action| action["key"].as_str().unwrap())
            .collect();
        assert_eq!(
            keys,
            vec![
                "open_until_next",
                "close_back_to_schedule",
                "open_one_entry",
                "close_if_single_open"
            ]
        );
        assert_eq!(body[0]["icon"], "mdi:turnstile");
    }

    #[tokio::test]
    async fn should_return_result_when_hub_accepts_command() {
        let (status, body) = send(
            test_app(Some(200), true),
            "POST",
            "/api/doors/7/actions/open_one_entry",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["status_line"], "OK (200)");
        assert_eq!(body["outcome"]["kind"], "ok");
    }

    #[tokio::test]
    async fn should_return_bad_gateway_when_hub_rejects_command() {
        let (status, body) = send(
            test_app(Some(503), true),
            "POST",
            "/api/doors/7/actions/close_back_to_schedule",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["http_status"], 503);
        assert_eq!(body["status_line"], "HTTP 503: hub says no");
    }

    #[tokio::test]
    async fn should_return_bad_gateway_without_status_when_hub_unreachable() {
        let (status, body) = send(
            test_app(None, true),
            "POST",
            "/api/doors/7/actions/open_until_next",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["http_status"], Value::Null);
        assert_eq!(body["error_detail"], "connection refused");
    }

    #[tokio::test]
    async fn should_return_bad_request_when_action_unknown() {
        let (status, _) = send(
            test_app(Some(200), true),
            "POST",
            "/api/doors/7/actions/unlock_forever",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_show_last_result_on_door_detail() {
        let app = test_app(Some(200), true);
        send(app.clone(), "POST", "/api/doors/7/actions/open_one_entry", None).await;

        let (status, body) = send(app, "GET", "/api/doors/7", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["last_results"][0]["action"], "open_one_entry");
    }

    #[tokio::test]
    async fn should_preview_discovered_doors() {
        let (status, body) = send(
            test_app(Some(200), true),
            "POST",
            "/api/discovery",
            Some(credentials()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["doors"][1]["door_id"], "2");
        assert_eq!(body["doors"][1]["display_name"], "Garage");
    }

    #[tokio::test]
    async fn should_return_bad_gateway_with_guidance_when_database_unreachable() {
        let (status, body) = send(
            test_app(Some(200), false),
            "POST",
            "/api/discovery",
            Some(credentials()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["kind"], "connection_failed");
        assert!(body["guidance"].as_str().unwrap().contains("credentials"));
    }

    #[tokio::test]
    async fn should_return_bad_request_when_credentials_incomplete() {
        let (status, _) = send(
            test_app(Some(200), true),
            "POST",
            "/api/discovery",
            Some(json!({"host": "db.lan", "database": "access", "username": "reader"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_import_selected_doors() {
        let app = test_app(Some(200), true);

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/discovery/selection",
            Some(json!({"database": credentials(), "selection": [2]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"created": 1, "skipped": 0}));
        let (_, doors) = send(app, "GET", "/api/doors", None).await;
        assert_eq!(doors[1]["unique_id"], "hub.lan:4960:2");
    }

    #[tokio::test]
    async fn should_return_unprocessable_when_selection_matches_nothing() {
        let (status, body) = send(
            test_app(Some(200), true),
            "POST",
            "/api/discovery/selection",
            Some(json!({"database": credentials(), "selection": [42]})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "no doors were selected for import");
    }
}
