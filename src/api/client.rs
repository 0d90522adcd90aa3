use super::{error::ApiError, models::*};
use async_trait::async_trait;

#[async_trait]
pub trait DnsApiClient {
    /// Public IP of the caller, as seen by the registrar.
    async fn ping(&self) -> Result<String, ApiError>;
    async fn retrieve_records(&self, domain: &str) -> Result<Vec<Record>, ApiError>;
    async fn edit_record(&self, domain: &str, id: &str, record: &Record) -> Result<(), ApiError>;
}
