//! The fetched collection: one source of truth per dashboard instance.
use contracts::domain::a001_tin_record::TinRecord;

use super::api::RequestError;

/// Sequence number of an issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was replaced wholesale
    Applied,
    /// The fetch failed; the last-known collection is kept. Carries the user message.
    Failed(String),
    /// A newer fetch was issued after this one; the response was dropped
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<TinRecord>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TinRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        FetchTicket(self.issued)
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<TinRecord>, RequestError>,
        fallback: &str,
    ) -> FetchOutcome {
        if ticket.0 != self.issued {
            log::debug!(
                "dropping stale TIN fetch #{} (latest #{})",
                ticket.0,
                self.issued
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                log::debug!("loaded {} TIN records", records.len());
                self.records = records;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                log::error!("TIN fetch failed: {}", e);
                let message = e.user_message(fallback);
                self.error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }
}
