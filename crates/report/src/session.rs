//! Per-user report state.
//!
//! A session remembers the uploaded file and the latest analysis result and
//! hands out at most one export ticket at a time.

use crate::SessionError;
use crate::payload::ReportSource;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Default)]
pub struct Session {
    file: Option<UploadedFile>,
    analysis: Option<Value>,
    exporting: Arc<AtomicBool>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new upload starts over: the previous analysis no longer applies.
    pub fn on_upload(&mut self, file: UploadedFile) {
        log::info!("Session upload: {} ({} bytes)", file.name, file.size);
        self.file = Some(file);
        self.analysis = None;
    }

    pub fn set_analysis(&mut self, payload: Value) {
        self.analysis = Some(payload);
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn has_analysis(&self) -> bool {
        self.analysis.is_some()
    }

    /// The report inputs as of now. Later changes to the session do not
    /// affect a snapshot already taken.
    pub fn snapshot(&self) -> Result<ReportSource, SessionError> {
        self.analysis
            .as_ref()
            .map(ReportSource::from_payload)
            .ok_or(SessionError::NoAnalysis)
    }

    pub fn clear(&mut self) {
        self.file = None;
        self.analysis = None;
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::Acquire)
    }

    /// Claims the session's single export slot until the ticket is dropped.
    pub fn try_begin_export(&self) -> Result<ExportTicket, SessionError> {
        self.exporting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SessionError::ExportInProgress)?;
        Ok(ExportTicket {
            slot: Arc::clone(&self.exporting),
        })
    }
}

/// Proof that an export is running. Releases the slot on drop.
#[derive(Debug)]
pub struct ExportTicket {
    slot: Arc<AtomicBool>,
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.slot.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upload(name: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            size: 128,
        }
    }

    #[test]
    fn upload_discards_previous_analysis() {
        let mut session = Session::new();
        session.on_upload(upload("sales.csv"));
        session.set_analysis(json!({ "analysis": { "summary": "old" } }));
        assert_eq!(session.snapshot().unwrap().summary, "old");

        session.on_upload(upload("costs.csv"));
        assert_eq!(session.snapshot(), Err(SessionError::NoAnalysis));
        assert_eq!(session.file().map(|f| f.name.as_str()), Some("costs.csv"));
    }

    #[test]
    fn snapshot_is_detached_from_later_updates() {
        let mut session = Session::new();
        session.set_analysis(json!({ "analysis": { "summary": "first" } }));
        let snapshot = session.snapshot().unwrap();
        session.set_analysis(json!({ "analysis": { "summary": "second" } }));
        assert_eq!(snapshot.summary, "first");
    }

    #[test]
    fn clear_resets_everything() {
        let mut session = Session::new();
        session.on_upload(upload("a.csv"));
        session.set_analysis(json!({}));
        session.clear();
        assert!(session.file().is_none());
        assert!(!session.has_analysis());
    }

    #[test]
    fn only_one_export_at_a_time() {
        let session = Session::new();
        let ticket = session.try_begin_export().unwrap();
        assert!(session.is_exporting());
        assert_eq!(
            session.try_begin_export().unwrap_err(),
            SessionError::ExportInProgress
        );

        drop(ticket);
        assert!(!session.is_exporting());
        assert!(session.try_begin_export().is_ok());
    }
}
