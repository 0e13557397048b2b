//! Relay client for the engine's HTTP interface.

use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use docgate_common::config::RelayTimeouts;
use docgate_common::error::{GatewayError, Result};
use docgate_common::types::{
    DocumentInventory, PdfPayload, QueryAnswer, STANDALONE_QUERY_PLACEHOLDER,
};

/// Client for the engine. Cheap to clone; the inner `reqwest::Client` is an
/// Arc-backed pool. Base URL and timeouts are fixed at startup.
#[derive(Debug, Clone)]
pub struct EngineClient {
    base_url: String,
    timeouts: RelayTimeouts,
    client: Client,
}

impl EngineClient {
    pub fn new(base_url: impl Into<String>, timeouts: RelayTimeouts) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeouts,
            client,
        })
    }

    /// Forward a validated question and result limit, and normalize the
    /// reply. No retry: the engine keeps conversational history, so a replay
    /// could duplicate a turn.
    pub async fn query(&self, question: &str, limit: u32) -> Result<QueryAnswer> {
        info!(limit, "relaying question to engine");
        let resp = self
            .client
            .get(format!("{}/query", self.base_url))
            .query(&[("question", question), ("limit", &limit.to_string())])
            .timeout(self.timeouts.query)
            .send()
            .await
            .map_err(classify_transport)?;
        let body = read_engine_json(resp).await?;

        let mut answer: QueryAnswer = serde_json::from_value(body)
            .map_err(|e| GatewayError::UpstreamUnavailable(format!("unreadable engine reply: {e}")))?;
        if answer.standalone_query.as_deref().map_or(true, str::is_empty) {
            answer.standalone_query = Some(STANDALONE_QUERY_PLACEHOLDER.to_string());
        }
        Ok(answer)
    }

    /// Send the whole batch as one multipart call: every file under the
    /// `files` field plus a `config_id` text field. The engine sees the batch
    /// atomically; its structured receipt is forwarded untouched.
    pub async fn ingest_bulk(&self, files: Vec<PdfPayload>, config_id: &str) -> Result<Value> {
        info!(count = files.len(), config_id, "relaying PDF batch to engine");
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.filename.clone())
                .mime_str(&file.mime_type)
                .map_err(|e| {
                    GatewayError::validation(format!(
                        "Type MIME illisible pour {}: {e}",
                        file.filename
                    ))
                })?;
            form = form.part("files", part);
        }
        form = form.text("config_id", config_id.to_string());

        let resp = self
            .client
            .post(format!("{}/ingest-bulk", self.base_url))
            .multipart(form)
            .timeout(self.timeouts.ingest)
            .send()
            .await
            .map_err(classify_transport)?;
        read_engine_json(resp).await
    }

    /// Ask the engine to drop its conversational history. Idempotent on the
    /// engine side; the acknowledgement payload is forwarded untouched.
    pub async fn clear_history(&self) -> Result<Value> {
        info!("relaying history reset to engine");
        let resp = self
            .client
            .post(format!("{}/clear-history", self.base_url))
            .json(&serde_json::json!({}))
            .timeout(self.timeouts.history)
            .send()
            .await
            .map_err(classify_transport)?;
        read_engine_json(resp).await
    }

    /// Fetch the names of previously ingested documents, in engine order.
    pub async fn ingested_documents(&self) -> Result<Vec<String>> {
        info!("relaying document inventory request to engine");
        let resp = self
            .client
            .get(format!("{}/ingested-documents", self.base_url))
            .timeout(self.timeouts.documents)
            .send()
            .await
            .map_err(classify_transport)?;
        let body = read_engine_json(resp).await?;
        let inventory: DocumentInventory = serde_json::from_value(body).unwrap_or_default();
        Ok(inventory.documents)
    }
}

/// Sort a transport-level failure into the taxonomy. Timeouts are the
/// per-relay deadlines above; everything else on the way to the engine is
/// "unavailable". The reqwest message is kept for the envelope's `details`.
fn classify_transport(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::UpstreamTimeout(err.to_string())
    } else {
        GatewayError::UpstreamUnavailable(err.to_string())
    }
}

/// Read the engine's JSON reply. On a non-2xx status, prefer the engine's
/// declared `detail` string; fall back to a status-derived message when the
/// body is absent or not JSON.
async fn read_engine_json(resp: reqwest::Response) -> Result<Value> {
    let status = resp.status();
    if !status.is_success() {
        let detail = resp
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body["detail"].as_str().map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        warn!(status = status.as_u16(), %detail, "engine returned an error");
        return Err(GatewayError::UpstreamStatus { status: status.as_u16(), detail });
    }
    resp.json().await.map_err(classify_transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn short_timeouts() -> RelayTimeouts {
        RelayTimeouts {
            ingest: Duration::from_millis(500),
            query: Duration::from_millis(500),
            history: Duration::from_millis(500),
            documents: Duration::from_millis(500),
        }
    }

    fn make_client(server: &MockServer) -> EngineClient {
        EngineClient::new(server.uri(), short_timeouts()).unwrap()
    }

    #[tokio::test]
    async fn test_query_substitutes_standalone_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("question", "Quel est le sujet ?"))
            .and(query_param("limit", "15"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "answer": "Pas d'infos trouvées.",
                "sources": []
            })))
            .mount(&server)
            .await;

        let answer = make_client(&server).query("Quel est le sujet ?", 15).await.unwrap();
        assert_eq!(answer.standalone_query.as_deref(), Some(STANDALONE_QUERY_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_query_keeps_source_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "answer": "ok",
                "standalone_query": "réécrite",
                "sources": [
                    {"text": "doc A", "is_identity": true},
                    {"text": "chunk 3", "is_identity": false, "chunk_index": 3, "score": 0.91},
                    {"text": "chunk 1", "is_identity": false, "chunk_index": 1, "score": 0.42}
                ]
            })))
            .mount(&server)
            .await;

        let answer = make_client(&server).query("ordre des sources", 3).await.unwrap();
        assert_eq!(answer.standalone_query.as_deref(), Some("réécrite"));
        let texts: Vec<&str> = answer.sources.iter().map(|s| s.text.as_str()).collect();
        // Relevance order from the engine, untouched even though scores are
        // not monotonic.
        assert_eq!(texts, ["doc A", "chunk 3", "chunk 1"]);
        assert!(answer.sources[0].is_identity);
        assert_eq!(answer.sources[1].chunk_index, Some(3));
    }

    #[tokio::test]
    async fn test_engine_error_detail_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "embedding service down"})),
            )
            .mount(&server)
            .await;

        let err = make_client(&server).query("une question", 15).await.unwrap_err();
        match err {
            GatewayError::UpstreamStatus { status, detail } => {
                assert_eq!(status, 500);
                assert_eq!(detail, "embedding service down");
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_engine_error_without_detail_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = make_client(&server).query("une question", 15).await.unwrap_err();
        match err {
            GatewayError::UpstreamStatus { status, detail } => {
                assert_eq!(status, 502);
                assert!(detail.contains("502"));
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_query_deadline_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"answer": "trop tard"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = make_client(&server).query("lente", 15).await.unwrap_err();
        assert!(matches!(err, GatewayError::UpstreamTimeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_ingest_bulk_sends_every_file_and_config_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ingest-bulk"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"overall_status": "completed"})),
            )
            .mount(&server)
            .await;

        let files = vec![
            PdfPayload {
                filename: "rapport.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                bytes: b"%PDF-1.7 un".to_vec(),
            },
            PdfPayload {
                filename: "annexe.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                bytes: b"%PDF-1.7 deux".to_vec(),
            },
        ];
        let receipt = make_client(&server).ingest_bulk(files, "01").await.unwrap();
        assert_eq!(receipt["overall_status"], "completed");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "the batch must travel as one call");
        let body = String::from_utf8_lossy(&requests[0].body);
        assert_eq!(body.matches("name=\"files\"").count(), 2);
        assert!(body.contains("filename=\"rapport.pdf\""));
        assert!(body.contains("filename=\"annexe.pdf\""));
        assert!(body.contains("name=\"config_id\""));
    }

    #[tokio::test]
    async fn test_clear_history_forwards_acknowledgement() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/clear-history"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Discussion reset successfully"})),
            )
            .mount(&server)
            .await;

        let client = make_client(&server);
        // Idempotent: a second reset on an already-empty history succeeds.
        for _ in 0..2 {
            let ack = client.clear_history().await.unwrap();
            assert_eq!(ack["message"], "Discussion reset successfully");
        }
    }

    #[tokio::test]
    async fn test_ingested_documents_normalizes_missing_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ingested-documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let docs = make_client(&server).ingested_documents().await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_ingested_documents_keeps_order_and_duplicates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ingested-documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "documents": ["b.pdf", "a.pdf", "b.pdf"]
            })))
            .mount(&server)
            .await;

        let docs = make_client(&server).ingested_documents().await.unwrap();
        assert_eq!(docs, ["b.pdf", "a.pdf", "b.pdf"]);
    }
}
