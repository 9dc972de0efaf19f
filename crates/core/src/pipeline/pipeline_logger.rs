use std::time::Instant;

/// Observer for pipeline stage events.
///
/// Keeps use cases free of any particular output mechanism.
pub trait PipelineLogger {
    /// Record how long a named stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards every event. Used by tests.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Forwards messages to the `log` facade and keeps stage timings, in the
/// order they were recorded, for a debug-level summary.
pub struct LogPipelineLogger {
    timings: Vec<(String, f64)>,
    start_time: Instant,
}

impl LogPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn timings(&self) -> &[(String, f64)] {
        &self.timings
    }

    /// Returns the formatted summary, or `None` if no stage was timed.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }
        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!("Pipeline summary ({:.2}s total):", elapsed_ms / 1000.0)];
        for (stage, ms) in &self.timings {
            lines.push(format!("  {stage:10}: {ms:8.1}ms"));
        }
        Some(lines.join("\n"))
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        log::debug!("{stage} took {duration_ms:.1}ms");
        self.timings.push((stage.to_string(), duration_ms));
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::debug!("\n{text}");
        }
    }
}
