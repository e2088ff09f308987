use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::clock::{Clock, SystemClock};
use crate::metrics::{Metrics, WordCountMode};

/// How wrong keystrokes are counted against accuracy
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
pub enum MistakePolicy {
    /// One error per position until it is typed correctly
    #[default]
    Debounced,
    /// One error per wrong keystroke
    EveryKeystroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub mistake_policy: MistakePolicy,
    pub word_count: WordCountMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Finished,
}

/// One attempt at typing a fixed target text
#[derive(Debug, Clone)]
pub struct TypingSession<C: Clock = SystemClock> {
    target: Vec<char>,
    cursor: usize,
    mistake_active: bool,
    error_count: usize,
    started_at: Option<SystemTime>,
    finished_at: Option<SystemTime>,
    status: Status,
    config: SessionConfig,
    clock: C,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProjection<'a> {
    pub target: &'a [char],
    pub cursor: usize,
    pub mistake_active: bool,
    pub status: Status,
    pub metrics: Option<Metrics>,
}

impl TypingSession<SystemClock> {
    pub fn new(target: &str, config: SessionConfig) -> Self {
        Self::with_clock(target, config, SystemClock)
    }
}

impl<C: Clock + Clone> TypingSession<C> {
    pub fn with_clock(target: &str, config: SessionConfig, clock: C) -> Self {
        let target: Vec<char> = target.chars().collect();
        let mut session = Self {
            target,
            cursor: 0,
            mistake_active: false,
            error_count: 0,
            started_at: None,
            finished_at: None,
            status: Status::InProgress,
            config,
            clock,
        };

        // nothing to type, so the session is over before it begins
        if session.target.is_empty() {
            session.finished_at = Some(session.clock.now());
            session.status = Status::Finished;
        }

        session
    }

    pub fn handle_character(&mut self, input: char) {
        if self.status == Status::Finished {
            return;
        }

        let expected = self.target[self.cursor];

        if input == expected {
            let was_first = self.cursor == 0;
            self.cursor += 1;
            self.mistake_active = false;

            if was_first {
                self.started_at = Some(self.clock.now());
                info!("session started");
            }

            if self.cursor == self.target.len() {
                self.finished_at = Some(self.clock.now());
                self.status = Status::Finished;
                info!(
                    "session finished with {} error(s) over {} chars",
                    self.error_count,
                    self.target.len()
                );
            }
        } else {
            let count_it = match self.config.mistake_policy {
                MistakePolicy::Debounced => !self.mistake_active,
                MistakePolicy::EveryKeystroke => true,
            };
            if count_it {
                self.error_count += 1;
                debug!(
                    "mistake at {}: expected {:?}, got {:?}",
                    self.cursor, expected, input
                );
            }
            self.mistake_active = true;
        }
    }

    /// Fresh session over the same text; `self` is left untouched.
    pub fn reset(&self) -> Self {
        debug!("session reset");
        Self::with_clock(&self.target_text(), self.config, self.clock.clone())
    }

    pub fn snapshot(&self) -> RenderProjection<'_> {
        RenderProjection {
            target: &self.target,
            cursor: self.cursor,
            mistake_active: self.mistake_active,
            status: self.status,
            metrics: self.metrics(),
        }
    }

    /// `None` until the session has finished
    pub fn metrics(&self) -> Option<Metrics> {
        match self.status {
            Status::InProgress => None,
            Status::Finished => Some(Metrics::compute(
                self.target.len(),
                self.error_count,
                self.started_at,
                self.finished_at,
                self.config.word_count,
            )),
        }
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mistake_active(&self) -> bool {
        self.mistake_active
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<SystemTime> {
        self.finished_at
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.status == Status::Finished
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }
}
