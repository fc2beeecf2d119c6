//! Run statistics for the loader pipeline

use std::time::{Duration, Instant};

/// Common timing information for a run
#[derive(Debug, Clone)]
pub struct TimingInfo {
    pub start_time: Instant,
    pub processing_duration: Duration,
}

impl Default for TimingInfo {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            processing_duration: Duration::default(),
        }
    }
}

impl TimingInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self) {
        self.processing_duration = self.start_time.elapsed();
    }

    pub fn elapsed(&self) -> Duration {
        if self.processing_duration.is_zero() {
            self.start_time.elapsed()
        } else {
            self.processing_duration
        }
    }
}

/// Join diagnostics computed from the stored tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinDiagnostics {
    /// Titles appearing more than once in `movies`
    pub duplicate_movie_titles: usize,
    /// Titles appearing more than once in `credits`
    pub duplicate_credit_titles: usize,
    /// Credit rows whose title has no movie
    pub unmatched_credits: usize,
}

impl JoinDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.duplicate_movie_titles == 0
            && self.duplicate_credit_titles == 0
            && self.unmatched_credits == 0
    }
}

/// Counters for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub movies_rows: usize,
    pub credits_rows: usize,
    pub combined_rows: usize,
    pub movies_bytes: usize,
    pub credits_bytes: usize,
    pub diagnostics: JoinDiagnostics,
    pub timing: TimingInfo,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of credit rows that found a movie, as a percentage
    pub fn match_rate(&self) -> f64 {
        if self.credits_rows > 0 {
            let matched = self.credits_rows - self.diagnostics.unmatched_credits.min(self.credits_rows);
            (matched as f64 / self.credits_rows as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "movies: {} rows, credits: {} rows, combined: {} rows ({:.1}% of credits matched)",
            self.movies_rows,
            self.credits_rows,
            self.combined_rows,
            self.match_rate()
        )
    }
}
