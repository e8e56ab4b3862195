use super::{
    CATALOG_PATH, CATEGORIES_PATH, CatalogApi, DEMO_DASHBOARD_PATH, DashboardApi,
    PROCESS_UPLOAD_PATH,
};
use crate::config::Settings;
use crate::core::upload::{UploadFile, UploadPair};
use crate::errors::{Error, FetchError, Result};
use crate::models::{BackendError, CatalogRecord, DashboardSummary};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Backend client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    settings: Settings,
}

impl HttpBackend {
    /// Builds a client honoring the configured request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, settings })
    }

    /// The settings this client was built with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> std::result::Result<T, FetchError> {
        let url = self.settings.endpoint(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| FetchError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

async fn read_dashboard(url: String, response: reqwest::Response) -> Result<DashboardSummary> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Network {
            url: url.clone(),
            source,
        })?;
    decode_dashboard_response(&url, status.as_u16(), &body)
}

fn upload_part(file: &UploadFile) -> Result<Part> {
    let part = Part::bytes(file.contents.clone()).file_name(file.file_name.clone());
    match &file.content_type {
        Some(content_type) => part
            .mime_str(content_type)
            .map_err(|e| Error::InvalidUpload {
                message: format!("Invalid content type {content_type:?}: {e}"),
            }),
        None => Ok(part),
    }
}

/// Decodes a dashboard response body.
///
/// The backend reports processing failures as `{"erro": "..."}`, usually with a
/// 4xx/5xx status but occasionally with 200. Both cases map to
/// [`Error::Backend`]; a failing status without an `erro` body maps to
/// [`FetchError::Status`].
///
/// # Errors
/// Returns an error if the status is a failure, the body carries an `erro`
/// message, or the body is not a dashboard payload.
pub fn decode_dashboard_response(url: &str, status: u16, body: &str) -> Result<DashboardSummary> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if (200..300).contains(&status) => {
            return Err(FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
            .into());
        }
        Err(_) => {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            }
            .into());
        }
    };

    if value.get("erro").is_some() {
        if let Ok(backend_error) = serde_json::from_value::<BackendError>(value) {
            warn!("Backend reported error for {}: {}", url, backend_error.message);
            return Err(Error::Backend {
                message: backend_error.message,
            });
        }
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        }
        .into());
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        }
        .into());
    }

    serde_json::from_value(value).map_err(|e| {
        FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

impl CatalogApi for HttpBackend {
    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> std::result::Result<Vec<CatalogRecord>, FetchError> {
        self.get_json(CATALOG_PATH).await
    }

    #[instrument(skip(self))]
    async fn fetch_categories(&self) -> std::result::Result<Vec<String>, FetchError> {
        self.get_json(CATEGORIES_PATH).await
    }
}

impl DashboardApi for HttpBackend {
    #[instrument(skip(self))]
    async fn fetch_demo_dashboard(&self) -> Result<DashboardSummary> {
        let url = self.settings.endpoint(DEMO_DASHBOARD_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;
        read_dashboard(url, response).await
    }

    #[instrument(skip(self, upload))]
    async fn process_upload(&self, upload: &UploadPair) -> Result<DashboardSummary> {
        let url = self.settings.endpoint(PROCESS_UPLOAD_PATH);
        let form = Form::new()
            .part("vendas", upload_part(&upload.sales)?)
            .part("estoque", upload_part(&upload.stock)?);

        debug!(
            "POST {} with {} and {}",
            url, upload.sales.file_name, upload.stock.file_name
        );
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;
        read_dashboard(url, response).await
    }
}
