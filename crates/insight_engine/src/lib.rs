//! Insight engine: fetches insight documents and hands them back as events.
mod client;
mod engine;
mod fetch;
mod types;

pub use client::{InsightClient, FAILED_TO_FETCH, NO_INSIGHTS};
pub use engine::EngineHandle;
pub use fetch::{request_url, FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{EngineError, EngineEvent, FailureKind, FetchError, FetchOutput, Generation};
