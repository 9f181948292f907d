//! Verification session: the lifetime of one OTP screen

use std::future::Future;
use std::sync::{Arc, Mutex};

use fint_shared::utils::email::{is_valid_email, mask_email, normalize_email};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::value_objects::{Notice, OtpSnapshot, Route, SubmissionState};
use crate::errors::{OtpError, OtpResult};

use super::config::OtpFlowConfig;
use super::state::{FlowState, SharedState};
use super::ticker::{spawn_ticker, TickerGuard};
use super::traits::{OtpApiTrait, SessionStoreTrait};
use super::types::{VerifyOutcome, RESEND_SUCCESS_MESSAGE};

/// Verification session for a single email address
///
/// Created when the verification screen mounts. It owns the code entry,
/// the resend countdown and every request it issues. Unmounting the
/// session, explicitly or by dropping it, stops the countdown and abandons
/// in-flight requests without touching the state again.
///
/// Share it behind an `Arc` when input handling and request dispatch run
/// on different tasks.
pub struct OtpSession<A: OtpApiTrait + 'static> {
    api: Arc<A>,
    store: Option<Arc<dyn SessionStoreTrait>>,
    email: String,
    config: OtpFlowConfig,
    state: Arc<SharedState>,
    cancel: CancellationToken,
    ticker: Mutex<Option<TickerGuard>>,
}

impl<A: OtpApiTrait + 'static> OtpSession<A> {
    /// Mount a session and start the countdown
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `api` - Backend implementation
    /// * `email` - Identifier handed over by the signup screen
    /// * `config` - Code length and countdown settings
    ///
    /// # Returns
    ///
    /// * `Ok(OtpSession)` - Mounted session with a running countdown
    /// * `Err(OtpError::InvalidEmail)` - If the identifier is not an email address
    pub fn mount(api: Arc<A>, email: &str, config: OtpFlowConfig) -> OtpResult<Self> {
        if !is_valid_email(email) {
            warn!(
                email = %mask_email(email),
                event = "otp_mount_rejected",
                "Refusing to mount verification session for invalid email"
            );
            return Err(OtpError::InvalidEmail {
                email: email.to_string(),
            });
        }

        let email = normalize_email(email);
        let state = Arc::new(SharedState::new(FlowState::new(&config)));
        let session = Self {
            api,
            store: None,
            email,
            config,
            state,
            cancel: CancellationToken::new(),
            ticker: Mutex::new(None),
        };
        session.start_countdown();

        info!(
            email = %mask_email(&session.email),
            digits = session.config.code_length.digits(),
            countdown = session.config.countdown_seconds,
            event = "otp_session_mounted",
            "Verification session mounted"
        );

        Ok(session)
    }

    /// Persist auth tokens returned by the backend into `store`
    pub fn with_session_store(mut self, store: Arc<dyn SessionStoreTrait>) -> Self {
        self.store = Some(store);
        self
    }

    /// Email this session verifies
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Current state
    pub fn snapshot(&self) -> OtpSnapshot {
        self.state.read(FlowState::snapshot)
    }

    /// Receive a snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<OtpSnapshot> {
        self.state.subscribe()
    }

    /// Whether the session has been unmounted
    pub fn is_unmounted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Text typed into a slot, see `OtpEntry::set_digit`
    pub fn set_digit(&self, index: usize, text: &str) -> bool {
        self.state.update(|s| s.entry.set_digit(index, text))
    }

    /// Backspace pressed on a slot, see `OtpEntry::backspace`
    pub fn backspace(&self, index: usize) -> bool {
        self.state.update(|s| s.entry.backspace(index))
    }

    /// Code pasted from the clipboard or an SMS/email autofill
    pub fn paste(&self, text: &str) -> bool {
        self.state.update(|s| s.entry.paste(text))
    }

    /// Empty every slot
    pub fn clear(&self) {
        self.state.update(|s| s.entry.clear())
    }

    /// Remove and return the pending alert
    pub fn take_notice(&self) -> Option<Notice> {
        self.state.update(|s| s.notice.take())
    }

    /// Remove and return the pending navigation
    pub fn take_navigation(&self) -> Option<Route> {
        self.state.update(|s| s.navigation.take())
    }

    /// Submit the entered code
    ///
    /// Dispatches exactly one verify call when every slot is filled and no
    /// other request is in flight. Digits are kept when the backend rejects
    /// the code so the user can correct them.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyOutcome)` - Code accepted, navigate to `outcome.route`
    /// * `Err(OtpError::IncompleteCode)` - Not all slots filled, nothing dispatched
    /// * `Err(OtpError::Busy)` / `Err(OtpError::AlreadyVerified)` - Action disabled
    /// * `Err(OtpError::Verify(_))` - Backend rejected the code or was unreachable
    /// * `Err(OtpError::Cancelled)` - Session unmounted before completion
    pub async fn submit(&self) -> OtpResult<VerifyOutcome> {
        if self.is_unmounted() {
            return Err(OtpError::Cancelled);
        }
        let code = self.state.update(|s| s.begin_submit())?;

        info!(
            email = %mask_email(&self.email),
            event = "otp_verify_dispatched",
            "Submitting verification code"
        );

        let response = match self
            .run_cancellable(self.api.verify_otp(&self.email, &code))
            .await
        {
            None => {
                debug!(event = "otp_verify_cancelled", "Verify request abandoned on unmount");
                return Err(OtpError::Cancelled);
            }
            Some(Ok(response)) => response,
            Some(Err(gateway_err)) => {
                let err = OtpError::Verify(gateway_err);
                warn!(
                    email = %mask_email(&self.email),
                    error = %err,
                    event = "otp_verify_failed",
                    "Verification code rejected"
                );
                self.state.update(|s| {
                    s.submission = SubmissionState::Failed(err.user_message());
                    s.notice = err.notice();
                });
                return Err(err);
            }
        };

        let token_saved = match response.token.as_deref() {
            Some(token) => self.persist_token(token).await,
            None => false,
        };

        self.state.update(|s| {
            s.submission = SubmissionState::Succeeded;
            s.notice = Some(Notice::success(response.message.clone()));
            s.navigation = Some(Route::Home);
        });
        self.stop_countdown();

        info!(
            email = %mask_email(&self.email),
            token_saved = token_saved,
            event = "otp_verified",
            "Verification code accepted"
        );

        Ok(VerifyOutcome {
            message: response.message,
            route: Route::Home,
            token_saved,
        })
    }

    /// Request a new code
    ///
    /// Only dispatches once the countdown has run out. A successful resend
    /// restarts the countdown; a failed one leaves it at zero so the user
    /// can try again.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Backend message
    /// * `Err(OtpError::ResendUnavailable)` - Countdown still running, nothing dispatched
    /// * `Err(OtpError::Busy)` / `Err(OtpError::AlreadyVerified)` - Action disabled
    /// * `Err(OtpError::Resend(_))` - Backend refused or was unreachable
    /// * `Err(OtpError::Cancelled)` - Session unmounted before completion
    pub async fn resend(&self) -> OtpResult<String> {
        if self.is_unmounted() {
            return Err(OtpError::Cancelled);
        }
        self.state.update(|s| s.begin_resend())?;

        info!(
            email = %mask_email(&self.email),
            event = "otp_resend_dispatched",
            "Requesting a new verification code"
        );

        match self.run_cancellable(self.api.resend_otp(&self.email)).await {
            None => {
                debug!(event = "otp_resend_cancelled", "Resend request abandoned on unmount");
                Err(OtpError::Cancelled)
            }
            Some(Ok(response)) => {
                self.state.update(|s| {
                    s.resending = false;
                    s.timer.reset();
                    s.notice = Some(Notice::success(RESEND_SUCCESS_MESSAGE));
                });
                self.start_countdown();
                info!(
                    email = %mask_email(&self.email),
                    event = "otp_resent",
                    "Verification code resent"
                );
                Ok(response.message)
            }
            Some(Err(gateway_err)) => {
                let err = OtpError::Resend(gateway_err);
                warn!(
                    email = %mask_email(&self.email),
                    error = %err,
                    event = "otp_resend_failed",
                    "Failed to resend verification code"
                );
                self.state.update(|s| {
                    s.resending = false;
                    s.notice = err.notice();
                });
                Err(err)
            }
        }
    }

    /// Tear the session down: stop the countdown and abandon in-flight calls
    ///
    /// Idempotent; also runs when the session is dropped.
    pub fn unmount(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        self.stop_countdown();
        debug!(
            email = %mask_email(&self.email),
            event = "otp_session_unmounted",
            "Verification session unmounted"
        );
    }

    fn start_countdown(&self) {
        if self.is_unmounted() || self.state.read(|s| s.timer.resend_available()) {
            return;
        }
        let guard = spawn_ticker(
            Arc::clone(&self.state),
            self.config.tick_interval,
            self.cancel.child_token(),
        );
        // Replacing the guard stops any previous ticker
        *self.ticker.lock().unwrap_or_else(|p| p.into_inner()) = Some(guard);
    }

    fn stop_countdown(&self) {
        if let Some(guard) = self.ticker.lock().unwrap_or_else(|p| p.into_inner()).take() {
            guard.cancel();
        }
    }

    async fn run_cancellable<F, T>(&self, call: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        with_cancellation(self.cancel.child_token(), call).await
    }

    async fn persist_token(&self, token: &str) -> bool {
        let Some(store) = self.store.as_ref() else {
            debug!(event = "otp_token_unstored", "No session store configured, token discarded");
            return false;
        };

        match store.save_token(&self.email, token).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    email = %mask_email(&self.email),
                    error = %e,
                    event = "otp_token_store_failed",
                    "Failed to persist auth token"
                );
                false
            }
        }
    }
}

impl<A: OtpApiTrait + 'static> Drop for OtpSession<A> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Run `call` unless `token` is cancelled first, in which case the call is
/// dropped and `None` is returned
async fn with_cancellation<F, T>(token: CancellationToken, call: F) -> Option<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        out = call => Some(out),
    }
}
