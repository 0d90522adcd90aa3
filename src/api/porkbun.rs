use super::{client::DnsApiClient, error::ApiError, models::*};
use crate::config::Secrets;
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};

pub struct PorkbunClient {
    client: reqwest::Client,
    base_url: String,
    secrets: Secrets,
}

#[async_trait]
impl DnsApiClient for PorkbunClient {
    async fn ping(&self) -> Result<String, ApiError> {
        let response: PingResponse = self.post("/ping", &self.secrets).await?;
        Ok(response.your_ip)
    }

    async fn retrieve_records(&self, domain: &str) -> Result<Vec<Record>, ApiError> {
        let response: RetrieveResponse = self
            .post(&format!("/dns/retrieve/{}", domain), &self.secrets)
            .await?;
        Ok(response.records)
    }

    async fn edit_record(&self, domain: &str, id: &str, record: &Record) -> Result<(), ApiError> {
        let _: StatusResponse = self
            .post(
                &format!("/dns/edit/{}/{}", domain, id),
                &EditRecordRequest::new(&self.secrets, record),
            )
            .await?;
        Ok(())
    }
}

impl PorkbunClient {
    pub fn new(base_url: impl Into<String>, secrets: Secrets) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            secrets,
        }
    }

    /// POSTs `body` as JSON to `base_url + path` and decodes a 200 response as `T`.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|e| e.message);
            return Err(ApiError::Status { status, message });
        }

        serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}
