// HTTP gateway against the Laravel-style case-management API

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use super::{CaseReport, CaseStatus, GatewayError, ReportGateway};
use crate::config::BackendConfig;
use crate::flow::ReportPayload;

const REQUEST_TIMEOUT_SECS: u64 = 15;

pub struct HttpGateway {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &BackendConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn submission_body(payload: &ReportPayload) -> Value {
        let mut body = json!({
            "source": "chatbot_guided",
            "resume_laporan": payload.summary_text,
        });
        if let Value::Object(ref mut map) = body {
            for (key, value) in &payload.fields {
                map.insert(key.clone(), Value::String(value.clone()));
            }
        }
        body
    }

    fn add_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Pull a tracking id out of the backend response, which has varied
    /// across API versions.
    fn extract_tracking_id(body: &Value) -> Option<String> {
        let data = body.get("data").unwrap_or(body);
        for key in ["reportId", "id_pelapor", "kode_laporan"] {
            if let Some(id) = data.get(key).and_then(Value::as_str) {
                return Some(id.to_string());
            }
        }
        None
    }

    fn parse_status(body: &Value) -> CaseStatus {
        let status = body.get("status").and_then(Value::as_str).unwrap_or("");
        let pelanggaran = body
            .get("status_pelanggaran")
            .and_then(Value::as_str)
            .unwrap_or("");

        if status == "complete" || pelanggaran == "selesai" {
            CaseStatus::Complete
        } else if status == "process" || pelanggaran == "diproses" {
            CaseStatus::Process
        } else {
            CaseStatus::Pending
        }
    }

    fn parse_report(tracking_id: &str, body: &Value) -> CaseReport {
        let data = body.get("data").unwrap_or(body);

        let created_at = data
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        CaseReport {
            tracking_id: data
                .get("id_pelapor")
                .and_then(Value::as_str)
                .unwrap_or(tracking_id)
                .to_string(),
            status: Self::parse_status(data),
            category: data
                .get("kategori")
                .and_then(Value::as_str)
                .map(String::from),
            created_at,
            admin_note: data
                .get("catatan_admin")
                .and_then(Value::as_str)
                .map(String::from),
        }
    }
}

#[async_trait]
impl ReportGateway for HttpGateway {
    async fn submit(&self, payload: &ReportPayload) -> Result<String, GatewayError> {
        let url = format!("{}/api/reports/chatbot-guided", self.base_url);
        let body = Self::submission_body(payload);

        tracing::info!("Submitting report to {}", url);

        let response = self
            .add_auth(self.client.post(&url))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GatewayError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!("HTTP {}: {}", status, body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        // Some deployments do not echo an id back; mint a local one so the
        // reporter always gets something they can quote.
        let tracking_id = Self::extract_tracking_id(&body)
            .unwrap_or_else(|| format!("PPKS{}", Utc::now().timestamp_millis()));

        tracing::info!("Report accepted, tracking id {}", tracking_id);
        Ok(tracking_id)
    }

    async fn status(&self, tracking_id: &str) -> Result<CaseReport, GatewayError> {
        let url = format!("{}/api/reports/{}", self.base_url, tracking_id);

        let response = self
            .add_auth(self.client.get(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(GatewayError::NotFound(tracking_id.to_string()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(GatewayError::Unauthorized)
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(GatewayError::Network(format!("HTTP {}: {}", status, body)));
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self::parse_report(tracking_id, &body))
    }
}
