//! HTTP implementation of the generator/export collaborator.

use crate::client::{decode_profiles, export_file_name, Collaborator, ExportFile, GenerateRequest};
use crate::error::{Error, Result};
use crate::model::ProfileRecord;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

/// Export request body
#[derive(Serialize)]
struct ExportBody<'a> {
    people: &'a [ProfileRecord],
}

/// Blocking HTTP client for the generator service
pub struct HttpCollaborator {
    client: Client,
    base_url: String,
}

impl HttpCollaborator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_url(&self, request: &GenerateRequest) -> String {
        format!(
            "{}/api/generate-israeli-person?{}",
            self.base_url,
            request.query_string()
        )
    }

    fn export_url(&self) -> String {
        format!("{}/download-excel", self.base_url)
    }
}

impl Collaborator for HttpCollaborator {
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<ProfileRecord>> {
        let url = self.generate_url(request);
        info!(count = request.count, "requesting profiles");
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| {
                error!("generation request failed: {e}");
                Error::GenerationFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "generation rejected");
            return Err(Error::GenerationFailed(format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .map_err(|e| Error::GenerationFailed(e.to_string()))?;
        let records =
            decode_profiles(&body).map_err(|e| Error::GenerationFailed(e.to_string()))?;

        info!(received = records.len(), "profiles received");
        Ok(records)
    }

    fn export_records(&self, records: &[ProfileRecord]) -> Result<ExportFile> {
        if records.is_empty() {
            return Err(Error::EmptyExport);
        }

        info!(records = records.len(), "exporting");
        let response = self
            .client
            .post(self.export_url())
            .header(ACCEPT, "application/json")
            .json(&ExportBody { people: records })
            .send()
            .map_err(|e| {
                error!("export request failed: {e}");
                Error::ExportFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "export rejected");
            return Err(Error::ExportFailed(format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::ExportFailed(e.to_string()))?
            .to_vec();

        Ok(ExportFile {
            bytes,
            file_name: export_file_name(chrono::Local::now().date_naive()),
        })
    }
}
