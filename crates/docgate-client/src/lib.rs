//! docgate-client — HTTP client for the retrieval/answer engine.
//!
//! One relay method per engine capability:
//!   query               — GET /query?question&limit
//!   ingest_bulk         — POST /ingest-bulk (multipart, atomic batch)
//!   clear_history       — POST /clear-history
//!   ingested_documents  — GET /ingested-documents
//!
//! Each relay carries its own deadline; the engine's answers are normalized
//! here so the web layer only ever sees the stable shapes in docgate-common.

pub mod engine;

pub use engine::EngineClient;
