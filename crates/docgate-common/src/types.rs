//! Wire types shared across the gateway/engine boundary.
//! All of these are request-scoped values; the gateway persists nothing.

use serde::{Deserialize, Serialize};

/// Substituted when the engine omits `standalone_query`, so the frontend can
/// always rely on the field being present.
pub const STANDALONE_QUERY_PLACEHOLDER: &str = "pas de standalone query";

/// Default benchmark configuration forwarded with every ingestion batch.
pub const DEFAULT_CONFIG_ID: &str = "01";

/// One uploaded file, buffered whole for the duration of a single request.
#[derive(Debug, Clone)]
pub struct PdfPayload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Normalized reply from the engine's query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub answer: String,
    #[serde(default)]
    pub standalone_query: Option<String>,
    /// Engine relevance order; never re-sorted here.
    #[serde(default)]
    pub sources: Vec<SourceChunk>,
}

/// One citation backing an answer. Document-level identity entries and
/// passage-level chunks share this shape; the optional fields are only
/// populated for the kind that carries them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceChunk {
    #[serde(default)]
    pub text: String,
    /// `true` for a document-level summary entry, `false` for a chunk.
    #[serde(default)]
    pub is_identity: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images_urls: Option<Vec<String>>,
    /// Tabular data as the engine shipped it; forwarded opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<serde_json::Value>,
}

/// Reply from the engine's document inventory endpoint. A missing or null
/// `documents` key deserializes to an empty list, so the gateway never puts
/// `null` on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentInventory {
    #[serde(default)]
    pub documents: Vec<String>,
}
