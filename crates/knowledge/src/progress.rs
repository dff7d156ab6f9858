//! Progress reporting for merge runs.
//!
//! The merger emits events; the CLI prints them to stdout.

use std::sync::Arc;
use std::time::Instant;

/// Phase of a merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePhase {
    /// Course markdown conversion
    Course,
    /// Discourse export extraction
    Discourse,
    /// An input file was skipped
    Skip,
    /// Output written
    Write,
}

impl MergePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Discourse => "discourse",
            Self::Skip => "skip",
            Self::Write => "write",
        }
    }
}

/// Progress event emitted during a merge.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub phase: MergePhase,

    /// Records produced so far in this phase
    pub count: usize,

    /// Human-readable message
    pub message: String,

    /// Seconds since the reporter was created
    pub elapsed_secs: Option<f64>,
}

impl ProgressEvent {
    pub fn new(phase: MergePhase, count: usize, message: impl Into<String>) -> Self {
        Self {
            phase,
            count,
            message: message.into(),
            elapsed_secs: None,
        }
    }

    /// Set elapsed time.
    pub fn with_elapsed(mut self, elapsed_secs: f64) -> Self {
        self.elapsed_secs = Some(elapsed_secs);
        self
    }

    /// Format as a single user-facing line.
    pub fn format_simple(&self) -> String {
        format!("[{}] {} - {}", self.phase.as_str(), self.count, self.message)
    }
}

/// Callback for progress events.
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Progress reporter that emits events through a callback.
#[derive(Clone)]
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
    start_time: Instant,
}

impl ProgressReporter {
    /// Create a new reporter with a callback.
    pub fn new(callback: ProgressCallback) -> Self {
        Self {
            callback: Some(callback),
            start_time: Instant::now(),
        }
    }

    /// Create a no-op reporter (events are only traced).
    pub fn noop() -> Self {
        Self {
            callback: None,
            start_time: Instant::now(),
        }
    }

    /// Emit a progress event.
    pub fn emit(&self, event: ProgressEvent) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let event = event.with_elapsed(elapsed);

        tracing::debug!(
            phase = event.phase.as_str(),
            count = event.count,
            message = %event.message,
            elapsed_secs = elapsed,
            "Merge progress"
        );

        if let Some(callback) = &self.callback {
            callback(event);
        }
    }

    /// Course phase finished.
    pub fn course_loaded(&self, count: usize) {
        self.emit(ProgressEvent::new(
            MergePhase::Course,
            count,
            format!("Loaded {} course content entries", count),
        ));
    }

    /// Discourse phase finished.
    pub fn discourse_loaded(&self, count: usize) {
        self.emit(ProgressEvent::new(
            MergePhase::Discourse,
            count,
            format!("Loaded {} discourse entries", count),
        ));
    }

    /// A file was skipped.
    pub fn skipped(&self, skipped_so_far: usize, file: &str, reason: &str) {
        self.emit(ProgressEvent::new(
            MergePhase::Skip,
            skipped_so_far,
            format!("Error reading {}: {}", file, reason),
        ));
    }

    /// Output written.
    pub fn written(&self, total: usize, output: &str) {
        self.emit(ProgressEvent::new(
            MergePhase::Write,
            total,
            format!("Merged {} entries into {}", total, output),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_progress_event_format() {
        let event = ProgressEvent::new(MergePhase::Course, 12, "Loaded 12 course content entries");
        assert_eq!(
            event.format_simple(),
            "[course] 12 - Loaded 12 course content entries"
        );
    }

    #[test]
    fn test_progress_reporter_emit() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        let reporter = ProgressReporter::new(Arc::new(move |event| {
            events_clone.lock().unwrap().push(event);
        }));

        reporter.discourse_loaded(3);
        reporter.written(5, "data/scraped_content.json");

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].phase, MergePhase::Discourse);
        assert_eq!(captured[0].count, 3);
        assert!(captured[1].message.contains("data/scraped_content.json"));
        assert!(captured[1].elapsed_secs.is_some());
    }

    #[test]
    fn test_noop_reporter() {
        let reporter = ProgressReporter::noop();
        reporter.skipped(1, "broken.json", "invalid JSON");
    }
}
