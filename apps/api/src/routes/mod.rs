pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document API
        .route("/api/v1/documents", post(handlers::handle_create_document))
        .route(
            "/api/v1/prompts/preview",
            post(handlers::handle_preview_prompt),
        )
        .route("/api/v1/agents", get(handlers::handle_list_agents))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::agents::AgentCatalog;
    use crate::config::Config;
    use crate::generation::orchestrator::ContentOrchestrator;
    use crate::generation::team_context::TeamDirectory;
    use crate::layout::fonts::FontSet;
    use crate::layout::{LayoutEngine, LayoutSettings};
    use crate::llm_client::{ModelClient, ModelError};
    use crate::storage::LocalDirStore;

    /// Answers every prompt with a fixed JSON object and reports itself unreachable.
    struct CannedModel {
        reply: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ModelClient for CannedModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }

        async fn health(&self) -> bool {
            false
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    struct Harness {
        router: Router,
        model: Arc<CannedModel>,
        output: tempfile::TempDir,
    }

    fn harness(reply: &'static str) -> Harness {
        let output = tempfile::tempdir().unwrap();
        let config = Config {
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "canned".to_string(),
            model_timeout: std::time::Duration::from_secs(1),
            output_dir: output.path().to_path_buf(),
            templates_dir: output.path().join("templates"),
            background_template: "letterhead.pdf".to_string(),
            team_descriptions_file: output.path().join("teams.json"),
            document_place: "Łódź".to_string(),
            font_dirs: None,
            s3: None,
            port: 0,
            rust_log: "info".to_string(),
        };

        let model = Arc::new(CannedModel {
            reply,
            calls: AtomicUsize::new(0),
        });
        let catalog = Arc::new(AgentCatalog::builtin());
        let orchestrator = ContentOrchestrator::new(
            catalog.clone(),
            Arc::new(TeamDirectory::empty()),
            model.clone(),
        );
        let layout = Arc::new(LayoutEngine::new(
            Arc::new(FontSet::builtin("test")),
            LayoutSettings {
                place: config.document_place.clone(),
                letterhead: Some(config.letterhead_path()),
            },
        ));

        let state = AppState {
            store: Arc::new(LocalDirStore::new(output.path())),
            config,
            catalog,
            orchestrator,
            layout,
            model: model.clone(),
        };

        Harness {
            router: build_router(state),
            model,
            output,
        }
    }

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn anna(document_type: &str, role: &str, notes: &str) -> Value {
        json!({
            "documentType": document_type,
            "subject": {
                "firstName": "Anna",
                "lastName": "Kowalska",
                "team": "Marketing",
                "status": "active",
                "role": role,
                "startDate": "2024-01-10"
            },
            "operatorNotes": notes
        })
    }

    #[tokio::test]
    async fn test_certificate_without_notes_skips_model_and_stores_pdf() {
        let h = harness(r#"{"additionalDescription": "nie powinno się pojawić"}"#);
        let (status, body) = call(
            &h.router,
            "POST",
            "/api/v1/documents",
            Some(anna("cert", "wolontariuszka", "")),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(h.model.calls.load(Ordering::SeqCst), 0);
        assert_eq!(body["documentType"], "cert");
        assert_eq!(body["pageCount"], 1);
        assert_eq!(body["content"]["fields"]["additionalDescription"], "");

        let filename = body["filename"].as_str().unwrap();
        assert!(filename.starts_with("certyfikat_Kowalska_Anna_"));
        let written = std::fs::read(h.output.path().join(filename)).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_references_with_notes_uses_model_fields() {
        let h = harness(
            r#"Oto wynik: {"referenceText": "Pani Anna prowadziła kampanie.",} Dziękuję."#,
        );
        let (status, body) = call(
            &h.router,
            "POST",
            "/api/v1/documents",
            Some(anna("references", "koordynatorka", "Prowadziła kampanie")),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(h.model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            body["content"]["fields"]["referenceText"],
            "Pani Anna prowadziła kampanie."
        );
        assert_eq!(body["warnings"][0]["kind"], "fontEmbeddingDegraded");
    }

    #[tokio::test]
    async fn test_internship_for_non_intern_is_rejected() {
        let h = harness("{}");
        let (status, body) = call(
            &h.router,
            "POST",
            "/api/v1/documents",
            Some(anna("internship", "Senior Developer", "Świetna praca")),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "ROLE_NOT_ELIGIBLE");
        assert_eq!(h.model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let h = harness("{}");
        let (status, body) = call(
            &h.router,
            "POST",
            "/api/v1/documents",
            Some(json!({ "documentType": "diploma", "subject": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let mut nameless = anna("cert", "", "");
        nameless["subject"]["lastName"] = json!(" ");
        let (status, _) = call(&h.router, "POST", "/api/v1/documents", Some(nameless)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_prompt_preview_does_not_call_model() {
        let h = harness("{}");
        let (status, body) = call(
            &h.router,
            "POST",
            "/api/v1/prompts/preview",
            Some(anna("internship", "praktykantka", "Przygotowała raport")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let prompt = body["prompt"].as_str().unwrap();
        assert!(prompt.contains("Anna Kowalska"));
        assert!(prompt.contains("Przygotowała raport"));
        assert_eq!(h.model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_agents_and_health() {
        let h = harness("{}");
        let (status, body) = call(&h.router, "GET", "/api/v1/agents", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body["agents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["references", "cert", "internship"]);

        let (status, body) = call(&h.router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"]["reachable"], false);
        assert_eq!(body["fonts"]["degraded"], true);
    }
}
