use serde::{Deserialize, Serialize};

use crate::config::Secrets;

/// One DNS record as the registrar returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    #[serde(default)]
    pub ttl: String,
}

#[derive(Serialize)]
pub struct EditRecordRequest<'a> {
    #[serde(flatten)]
    pub auth: &'a Secrets,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub content: &'a str,
    pub ttl: &'a str,
}

impl<'a> EditRecordRequest<'a> {
    pub fn new(secrets: &'a Secrets, record: &'a Record) -> Self {
        Self {
            auth: secrets,
            name: &record.name,
            record_type: &record.record_type,
            content: &record.content,
            ttl: &record.ttl,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PingResponse {
    #[allow(dead_code)]
    pub status: String,
    #[serde(rename = "yourIp")]
    pub your_ip: String,
}

#[derive(Debug, Deserialize)]
pub struct RetrieveResponse {
    #[allow(dead_code)]
    pub status: String,
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[allow(dead_code)]
    pub status: String,
}

/// Body the registrar sends alongside a non-200 status.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
