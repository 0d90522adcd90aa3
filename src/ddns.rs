use anyhow::{Context, Result};
use log::{error, info, warn};

use crate::api::{ApiError, DnsApiClient, Record};
use crate::cache::PrevIpStore;

const A_RECORD: &str = "A";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
    pub updated: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The registrar reported the same IP that is cached; nothing was fetched.
    Unchanged,
    /// The IP changed but no A record of the domain is stale; the cache keeps
    /// the old IP so the next run fetches again.
    NothingToUpdate,
    Updated(UpdateSummary),
}

/// One update run against a single domain.
pub struct Ddns<C> {
    client: C,
    store: PrevIpStore,
    domain: String,
    current_ip: Option<String>,
}

impl<C: DnsApiClient> Ddns<C> {
    pub fn new(client: C, store: PrevIpStore, domain: impl Into<String>) -> Self {
        Self {
            client,
            store,
            domain: domain.into(),
            current_ip: None,
        }
    }

    pub async fn get_ip(&mut self) -> Result<String, ApiError> {
        let ip = self.client.ping().await?;
        self.current_ip = Some(ip.clone());
        Ok(ip)
    }

    pub async fn fetch_records(&self) -> Result<Vec<Record>> {
        let records = self
            .client
            .retrieve_records(&self.domain)
            .await
            .with_context(|| format!("Could not fetch records for {}", self.domain))?;

        info!("Fetched {} records for {}", records.len(), self.domain);
        Ok(records)
    }

    /// Pushes each record to the registrar, then caches the current IP.
    ///
    /// A failed edit is logged and counted; it does not stop the batch.
    pub async fn update_records(&self, records: &[Record]) -> Result<UpdateSummary> {
        let mut summary = UpdateSummary::default();

        for record in records {
            let Some(id) = record.id.as_deref() else {
                error!("Unable to update record {:?}: missing id", record.name);
                summary.failed += 1;
                continue;
            };

            match self.client.edit_record(&self.domain, id, record).await {
                Ok(()) => {
                    info!(
                        "Record updated for {:?} (id {}) -> {}",
                        record.name, id, record.content
                    );
                    summary.updated += 1;
                }
                Err(e) => {
                    error!(
                        "Unable to update record {:?} (id {}), status {}: {}",
                        record.name,
                        id,
                        e.status().map_or_else(|| "-".to_string(), |s| s.to_string()),
                        e
                    );
                    summary.failed += 1;
                }
            }
        }

        match self.current_ip.as_deref() {
            Some(ip) if !ip.is_empty() => {
                self.store.update(ip)?;
            }
            _ => warn!("No current IP known, leaving the IP cache untouched"),
        }

        Ok(summary)
    }

    pub async fn run(&mut self) -> Result<RunOutcome> {
        let ip = match self.get_ip().await {
            Ok(ip) => ip,
            Err(e) => {
                error!("Failed to resolve current IP: {}", e);
                String::new()
            }
        };
        info!("Current IP: {}", ip);

        let prev_ip = match self.store.load() {
            Ok(prev) => prev.unwrap_or_default(),
            Err(e) => {
                warn!("{:#}", e);
                String::new()
            }
        };

        if ip == prev_ip {
            info!(
                "IP unchanged (cached at {}), nothing to update",
                self.store.path().display()
            );
            return Ok(RunOutcome::Unchanged);
        }
        info!(
            "IP changed from {} to {}",
            if prev_ip.is_empty() { "<unknown>" } else { prev_ip.as_str() },
            ip
        );

        let records = self.fetch_records().await?;
        let records = filter_records(&self.domain, &ip, records);
        if records.is_empty() {
            info!("No A records of {} need updating", self.domain);
            return Ok(RunOutcome::NothingToUpdate);
        }
        info!("{} A records need updating", records.len());

        let summary = self.update_records(&records).await?;
        info!(
            "Done. {} updated, {} failed.",
            summary.updated, summary.failed
        );
        Ok(RunOutcome::Updated(summary))
    }
}

/// Picks the A records of `domain` that do not point at `ip` yet, rewritten
/// into the form the edit endpoint expects.
pub fn filter_records(domain: &str, ip: &str, records: Vec<Record>) -> Vec<Record> {
    if ip.is_empty() || domain.is_empty() {
        return Vec::new();
    }

    records
        .into_iter()
        .filter(|r| r.record_type == A_RECORD && r.content != ip && belongs_to(&r.name, domain))
        .map(|mut r| {
            r.content = ip.to_string();
            r.name = if r.name.eq_ignore_ascii_case(domain) {
                String::new()
            } else {
                first_label(&r.name).to_string()
            };
            r
        })
        .collect()
}

/// `name` is `domain` itself or one of its subdomains.
fn belongs_to(name: &str, domain: &str) -> bool {
    if name.eq_ignore_ascii_case(domain) {
        return true;
    }

    let Some(split) = name.len().checked_sub(domain.len() + 1) else {
        return false;
    };
    if split == 0 || !name.is_char_boundary(split) {
        return false;
    }

    let (head, tail) = name.split_at(split);
    !head.is_empty()
        && tail.starts_with('.')
        && tail[1..].eq_ignore_ascii_case(domain)
}

fn first_label(name: &str) -> &str {
    name.split_once('.').map_or(name, |(label, _)| label)
}
