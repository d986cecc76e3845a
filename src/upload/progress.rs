//! Batch progress reporting.

use super::UploadError;
use crate::model::PhotoRecord;

/// Status line shown while file `index` (1-based) of `total` is in flight.
pub fn status_text(index: usize, total: usize) -> String {
    format!("Uploading {index}/{total}\u{2026}")
}

/// A file that did not make it into the album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub name: String,
    pub message: String,
}

/// Outcome of one upload batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub total: usize,
    pub uploaded: Vec<PhotoRecord>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Percentage of the batch uploaded successfully.
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        self.uploaded.len() as f32 / self.total as f32 * 100.0
    }
}

/// Receives batch progress. Every method has a no-op default.
pub trait UploadObserver {
    fn batch_started(&mut self, _total: usize) {}

    /// `status` is the text from [`status_text`].
    fn file_started(&mut self, _index: usize, _total: usize, _status: &str) {}

    fn progress(&mut self, _percent: f32) {}

    /// Called once per failed file; surfaced to the user immediately.
    fn file_failed(&mut self, _name: &str, _error: &UploadError) {}

    fn batch_finished(&mut self, _report: &BatchReport) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(1, 3), "Uploading 1/3\u{2026}");
    }

    #[test]
    fn test_percent() {
        let mut report = BatchReport::new(4);
        assert_eq!(report.percent(), 0.0);
        report.uploaded.push(PhotoRecord::new("u", "p", chrono::Utc::now()));
        assert_eq!(report.percent(), 25.0);
        assert_eq!(BatchReport::new(0).percent(), 100.0);
    }
}
