use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Characters that make up one standard word
pub const CHARS_PER_WORD: usize = 5;

/// How the target length is turned into a word count for WPM
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WordCountMode {
    /// `len / 5` with integer division, so a 28 char sentence counts as 5 words
    #[default]
    Whole,
    /// `len / 5.0`
    Fractional,
}

pub const DEFAULT_WORD_COUNT: WordCountMode = WordCountMode::Whole;

impl WordCountMode {
    pub fn words(self, chars: usize) -> f64 {
        match self {
            WordCountMode::Whole => (chars / CHARS_PER_WORD) as f64,
            WordCountMode::Fractional => chars as f64 / CHARS_PER_WORD as f64,
        }
    }
}

/// Results of a finished session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub elapsed_secs: f64,
    pub words_typed: f64,
    pub wpm: f64,
    pub accuracy: f64,
}

impl Metrics {
    pub fn compute(
        target_len: usize,
        error_count: usize,
        started_at: Option<SystemTime>,
        finished_at: Option<SystemTime>,
        mode: WordCountMode,
    ) -> Self {
        let elapsed_secs = elapsed_secs(started_at, finished_at);
        let words_typed = mode.words(target_len);

        Self {
            elapsed_secs,
            words_typed,
            wpm: wpm(words_typed, elapsed_secs),
            accuracy: accuracy(target_len, error_count),
        }
    }
}

/// Seconds between start and finish; zero when either is missing or the
/// clock went backwards.
pub fn elapsed_secs(started_at: Option<SystemTime>, finished_at: Option<SystemTime>) -> f64 {
    match (started_at, finished_at) {
        (Some(start), Some(end)) => end
            .duration_since(start)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn wpm(words_typed: f64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        (words_typed / elapsed_secs) * 60.0
    } else {
        0.0
    }
}

/// Percentage of the target typed without a recorded error, rounded.
/// Never below 0 even when errors outnumber characters.
pub fn accuracy(target_len: usize, error_count: usize) -> f64 {
    if target_len == 0 {
        return 100.0;
    }
    let correct = target_len.saturating_sub(error_count);
    ((correct as f64 / target_len as f64) * 100.0).round()
}
