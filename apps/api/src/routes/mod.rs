pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/v1/options", get(catalog::handle_options))
        .route("/api/v1/listings", get(catalog::handle_list_listings))
        .route("/api/v1/listings/:id", get(catalog::handle_get_listing))
        // Session API
        .route("/api/v1/sessions", post(wizard::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(wizard::handle_get_session).delete(wizard::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/actions",
            post(wizard::handle_action),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use std::collections::HashMap;

    use async_trait::async_trait;

    use crate::catalog::tests::sample_catalog;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::models::credential::Credential;
    use crate::models::listing::Listing;
    use crate::models::profile::UserProfile;
    use crate::processing::{ReasonGenerator, StaticReasonGenerator};
    use crate::sessions::SessionStore;
    use crate::wizard::view::FALLBACK_REASON;

    struct UnavailableGenerator;

    #[async_trait]
    impl ReasonGenerator for UnavailableGenerator {
        async fn generate(
            &self,
            _profile: &UserProfile,
            _listings: &[Listing],
            _credential: &Credential,
        ) -> Result<HashMap<String, String>, AppError> {
            Err(AppError::Llm("service unavailable".to_string()))
        }

        fn backend(&self) -> &'static str {
            "unavailable"
        }
    }

    fn state_with(stage_delay: Duration, reason_generator: Arc<dyn ReasonGenerator>) -> AppState {
        AppState {
            catalog: Arc::new(sample_catalog()),
            sessions: SessionStore::new(),
            config: Config {
                processing_stage_delay: stage_delay,
                ..Config::default()
            },
            reason_generator,
        }
    }

    fn test_state() -> AppState {
        state_with(Duration::ZERO, Arc::new(StaticReasonGenerator))
    }

    /// Walks a new session through onboarding up to the processing page.
    async fn session_at_processing(app: &Router) -> String {
        let (_, created) = send(app, "POST", "/api/v1/sessions", None).await;
        let id = created["session_id"].as_str().unwrap().to_string();
        walk_to_processing(app, &id).await;
        id
    }

    async fn walk_to_processing(app: &Router, id: &str) {
        for action in [
            json!({"action": "start"}),
            json!({"action": "submit_academic", "year": "3학년", "major": "컴퓨터과학과"}),
            json!({"action": "submit_career", "roles": ["개발 / IT"]}),
            json!({"action": "submit_personal", "name": "홍길동", "email": "hong@yonsei.ac.kr"}),
        ] {
            act(app, id, action).await;
        }
        let view = act(app, id, json!({"action": "request_recommendations"})).await;
        assert_eq!(view["view"]["page"], "ai_processing");
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn act(app: &Router, session: &str, action: Value) -> Value {
        let (status, body) = send(
            app,
            "POST",
            &format!("/api/v1/sessions/{session}/actions"),
            Some(action),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }

    #[tokio::test]
    async fn test_health_reports_dataset() {
        let app = build_router(test_state());
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["listings"], 20);
    }

    #[tokio::test]
    async fn test_full_wizard_flow_reaches_recommendations() {
        let app = build_router(test_state());
        let (status, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["view"]["page"], "landing");
        let id = created["session_id"].as_str().unwrap().to_string();

        act(&app, &id, json!({"action": "start"})).await;

        let blocked = act(
            &app,
            &id,
            json!({"action": "submit_academic", "year": "", "major": "경영학과"}),
        )
        .await;
        assert_eq!(blocked["view"]["page"], "academic_info");
        assert_eq!(blocked["signal"]["kind"], "blocked");
        assert_eq!(blocked["signal"]["reason"]["code"], "missing_fields");

        act(
            &app,
            &id,
            json!({"action": "submit_academic", "year": "3학년", "major": "경영학과"}),
        )
        .await;
        act(
            &app,
            &id,
            json!({"action": "submit_career", "roles": ["개발 / IT"]}),
        )
        .await;
        act(
            &app,
            &id,
            json!({"action": "submit_personal", "name": "홍길동", "email": "hong@yonsei.ac.kr"}),
        )
        .await;
        let keywords = act(&app, &id, json!({"action": "add_keyword", "keyword": "파이썬"})).await;
        assert_eq!(keywords["view"]["keywords"], json!(["파이썬"]));

        let prompt = act(&app, &id, json!({"action": "request_recommendations"})).await;
        assert_eq!(prompt["view"]["page"], "ai_processing");
        assert_eq!(prompt["view"]["credential_required"], true);

        let missing = act(&app, &id, json!({"action": "submit_credential", "api_key": ""})).await;
        assert_eq!(missing["signal"]["reason"]["code"], "missing_credential");
        assert_eq!(missing["signal"]["message"], "API Key가 필요합니다.");

        let done = act(
            &app,
            &id,
            json!({"action": "submit_credential", "api_key": "sk-test"}),
        )
        .await;
        assert_eq!(done["view"]["page"], "recommendations");
        assert_eq!(done["view"]["jobs"]["cards"].as_array().unwrap().len(), 12);
        assert_eq!(done["view"]["jobs"]["summary"], "총 12건의 공고");

        let empty = act(
            &app,
            &id,
            json!({"action": "update_filter", "search": "없는공고"}),
        )
        .await;
        assert_eq!(empty["view"]["jobs"]["summary"], "총 0건의 공고");
        assert_eq!(empty["view"]["programs"]["summary"], "총 0건의 공고");
    }

    #[tokio::test]
    async fn test_detail_save_and_back() {
        let app = build_router(test_state());
        let (_, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        let id = created["session_id"].as_str().unwrap().to_string();
        for action in [
            json!({"action": "start"}),
            json!({"action": "submit_academic", "year": "3학년", "major": "컴퓨터과학과"}),
            json!({"action": "submit_career", "roles": ["개발 / IT"], "industries": ["IT / 테크"]}),
            json!({"action": "submit_personal", "name": "홍길동", "email": "hong@yonsei.ac.kr"}),
            json!({"action": "request_recommendations"}),
            json!({"action": "submit_credential", "api_key": "sk-test"}),
        ] {
            act(&app, &id, action).await;
        }

        let detail = act(&app, &id, json!({"action": "open_detail", "listing_id": "7"})).await;
        assert_eq!(detail["view"]["page"], "detail");
        assert_eq!(detail["view"]["listing"]["id"], "7");
        assert_eq!(detail["view"]["saved"], false);

        act(&app, &id, json!({"action": "save"})).await;
        let again = act(&app, &id, json!({"action": "save"})).await;
        assert_eq!(again["signal"]["kind"], "saved");
        assert_eq!(again["signal"]["message"], "저장되었습니다!");
        assert_eq!(again["view"]["saved"], true);

        let applied = act(&app, &id, json!({"action": "apply"})).await;
        assert_eq!(applied["signal"]["message"], "지원이 완료되었습니다!");

        let back = act(&app, &id, json!({"action": "back"})).await;
        assert_eq!(back["view"]["page"], "recommendations");
        assert_eq!(back["view"]["saved_count"], 1);

        let saved = act(&app, &id, json!({"action": "show_saved"})).await;
        assert_eq!(saved["view"]["page"], "saved");
        assert_eq!(saved["view"]["cards"][0]["id"], "7");
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_during_processing_keeps_credential_gate() {
        let app = build_router(state_with(
            Duration::from_millis(300),
            Arc::new(StaticReasonGenerator),
        ));
        let id = session_at_processing(&app).await;

        let in_flight = tokio::spawn({
            let app = app.clone();
            let id = id.clone();
            async move {
                act(&app, &id, json!({"action": "submit_credential", "api_key": "sk-test"})).await
            }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let again = act(
            &app,
            &id,
            json!({"action": "submit_credential", "api_key": "sk-test"}),
        )
        .await;
        assert_eq!(again["signal"]["reason"]["code"], "processing_in_progress");

        act(&app, &id, json!({"action": "restart"})).await;
        walk_to_processing(&app, &id).await;
        let (_, current) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(current["view"]["credential_required"], true);

        let finished = in_flight.await.unwrap();
        assert_eq!(finished["view"]["page"], "ai_processing");

        let (_, current) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(current["view"]["page"], "ai_processing");
        assert_eq!(current["view"]["credential_required"], true);
    }

    #[tokio::test]
    async fn test_failing_reason_generator_still_recommends_with_fallback() {
        let app = build_router(state_with(Duration::ZERO, Arc::new(UnavailableGenerator)));
        let id = session_at_processing(&app).await;

        let done = act(
            &app,
            &id,
            json!({"action": "submit_credential", "api_key": "sk-test"}),
        )
        .await;
        assert_eq!(done["view"]["page"], "recommendations");
        assert!(done["signal"].is_null());

        let detail = act(&app, &id, json!({"action": "open_detail", "listing_id": "1"})).await;
        assert_eq!(detail["view"]["page"], "detail");
        assert_eq!(detail["view"]["reason"], FALLBACK_REASON);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let app = build_router(test_state());
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/sessions/00000000-0000-0000-0000-000000000000/actions",
            Some(json!({"action": "start"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_action_is_400() {
        let app = build_router(test_state());
        let (_, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        let uri = format!(
            "/api/v1/sessions/{}/actions",
            created["session_id"].as_str().unwrap()
        );

        let (status, body) = send(&app, "POST", &uri, Some(json!({"action": "teleport"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        // Completion is internal only.
        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(json!({"action": "processing_complete", "reasons": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = build_router(test_state());
        let (_, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        let uri = format!("/api/v1/sessions/{}", created["session_id"].as_str().unwrap());

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listing_query_filters_by_type_and_search() {
        let app = build_router(test_state());
        let (status, body) = send(&app, "GET", "/api/v1/listings?type=job", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 12);

        let (_, body) = send(
            &app,
            "GET",
            "/api/v1/listings?type=program&search=%EA%B8%B0%EC%97%85%2015",
            None,
        )
        .await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["listings"][0]["id"], "15");

        let (_, body) = send(&app, "GET", "/api/v1/listings?industry=All", None).await;
        assert_eq!(body["total"], 20);

        let (status, body) = send(&app, "GET", "/api/v1/listings?type=webinar", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_listing_and_options() {
        let app = build_router(test_state());
        let (status, body) = send(&app, "GET", "/api/v1/listings/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "채용");

        let (status, _) = send(&app, "GET", "/api/v1/listings/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, options) = send(&app, "GET", "/api/v1/options", None).await;
        assert_eq!(options["roles"].as_array().unwrap().len(), 6);
        assert_eq!(options["max_selections"], 3);
    }
}
