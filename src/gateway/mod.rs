// Report gateway
//
// Submission and status lookup against the case-management backend, plus
// the on-disk outbox used when submission fails and the deterministic
// status timeline shown to reporters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::flow::ReportPayload;

pub mod http;
pub mod outbox;
pub mod timeline;

pub use http::HttpGateway;
pub use outbox::Outbox;
pub use timeline::{build_steps, TimelineStep};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("report rejected by backend: {0}")]
    Rejected(String),

    #[error("no report found for tracking id {0}")]
    NotFound(String),

    #[error("backend refused the request (check credentials)")]
    Unauthorized,

    #[error("network error: {0}")]
    Network(String),
}

/// Case handling stage as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    /// Received, awaiting verification
    Pending,
    /// Verified and under investigation
    Process,
    /// Investigation finished, case closed
    Complete,
}

/// A case as returned by the status endpoint.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub tracking_id: String,
    pub status: CaseStatus,
    pub category: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub admin_note: Option<String>,
}

/// Trait for the case-management backend
#[async_trait]
pub trait ReportGateway: Send + Sync {
    /// Submit an assembled report; returns the tracking id on success
    async fn submit(&self, payload: &ReportPayload) -> Result<String, GatewayError>;

    /// Look up a previously submitted case by tracking id
    async fn status(&self, tracking_id: &str) -> Result<CaseReport, GatewayError>;
}
