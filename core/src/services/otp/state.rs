//! Mutable flow state shared between the session and its countdown ticker

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

use crate::domain::entities::{CountdownTimer, OtpEntry};
use crate::domain::value_objects::{FlowPhase, Notice, OtpSnapshot, Route, SubmissionState};
use crate::errors::OtpError;

use super::config::OtpFlowConfig;

/// Everything a verification screen renders
#[derive(Debug, Clone)]
pub(crate) struct FlowState {
    pub entry: OtpEntry,
    pub timer: CountdownTimer,
    pub submission: SubmissionState,
    pub resending: bool,
    pub notice: Option<Notice>,
    pub navigation: Option<Route>,
}

impl FlowState {
    pub fn new(config: &OtpFlowConfig) -> Self {
        Self {
            entry: OtpEntry::new(config.code_length),
            timer: CountdownTimer::new(config.countdown_seconds),
            submission: SubmissionState::Idle,
            resending: false,
            notice: None,
            navigation: None,
        }
    }

    fn in_flight(&self) -> bool {
        self.resending || self.submission == SubmissionState::Submitting
    }

    /// Guard and enter `Submitting`, returning the code to dispatch
    pub fn begin_submit(&mut self) -> Result<String, OtpError> {
        if self.submission == SubmissionState::Succeeded {
            return Err(OtpError::AlreadyVerified);
        }
        if self.in_flight() {
            return Err(OtpError::Busy);
        }
        if !self.entry.is_complete() {
            let err = OtpError::IncompleteCode {
                expected: self.entry.len(),
            };
            self.notice = err.notice();
            return Err(err);
        }

        self.submission = SubmissionState::Submitting;
        self.notice = None;
        Ok(self.entry.code())
    }

    /// Guard and mark a resend as in flight
    pub fn begin_resend(&mut self) -> Result<(), OtpError> {
        if self.submission == SubmissionState::Succeeded {
            return Err(OtpError::AlreadyVerified);
        }
        if self.in_flight() {
            return Err(OtpError::Busy);
        }
        if !self.timer.resend_available() {
            return Err(OtpError::ResendUnavailable {
                remaining: self.timer.remaining(),
            });
        }

        self.resending = true;
        self.notice = None;
        Ok(())
    }

    pub fn snapshot(&self) -> OtpSnapshot {
        OtpSnapshot {
            digits: self.entry.digits(),
            focus: self.entry.focus(),
            seconds_remaining: self.timer.remaining(),
            resend_available: self.timer.resend_available(),
            resend_in_flight: self.resending,
            submission: self.submission.clone(),
            phase: FlowPhase::from(&self.submission),
            can_submit: self.entry.is_complete()
                && !self.in_flight()
                && self.submission != SubmissionState::Succeeded,
            notice: self.notice.clone(),
            navigation: self.navigation,
        }
    }
}

/// Flow state behind a mutex plus the channel observers watch
///
/// The lock is never held across an await point, so every mutation runs
/// to completion before the next one starts.
pub(crate) struct SharedState {
    inner: Mutex<FlowState>,
    tx: watch::Sender<OtpSnapshot>,
}

impl SharedState {
    pub fn new(state: FlowState) -> Self {
        let (tx, _rx) = watch::channel(state.snapshot());
        Self {
            inner: Mutex::new(state),
            tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply a mutation and publish the resulting snapshot if it changed
    pub fn update<R>(&self, f: impl FnOnce(&mut FlowState) -> R) -> R {
        let mut state = self.lock();
        let result = f(&mut state);
        let next = state.snapshot();
        self.tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        result
    }

    /// Read without publishing
    pub fn read<R>(&self, f: impl FnOnce(&FlowState) -> R) -> R {
        f(&self.lock())
    }

    pub fn subscribe(&self) -> watch::Receiver<OtpSnapshot> {
        self.tx.subscribe()
    }
}
