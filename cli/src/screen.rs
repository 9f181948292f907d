//! Terminal rendition of the verification screen

use std::sync::Arc;

use anyhow::Result;
use fint_core::domain::value_objects::{FlowPhase, Notice, OtpSnapshot};
use fint_core::errors::OtpError;
use fint_core::services::{OtpApiTrait, OtpSession};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::command::{Command, HELP};

/// How the screen was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Code accepted, the app moves on to its home screen
    Verified,
    /// User quit
    Quit,
    /// Input ended and no request was left in flight
    InputClosed,
}

/// Render the code slots and the countdown on one line
pub fn render(snapshot: &OtpSnapshot) -> String {
    let slots: Vec<String> = snapshot
        .digits
        .iter()
        .enumerate()
        .map(|(i, digit)| {
            let shown = if digit.is_empty() { "_" } else { digit.as_str() };
            if i == snapshot.focus {
                format!(">{}<", shown)
            } else {
                format!("[{}]", shown)
            }
        })
        .collect();

    let mut line = format!("{}  {}", slots.join(" "), snapshot.timer_label());
    if snapshot.phase == FlowPhase::Submitting {
        line.push_str("  (verifying...)");
    }
    if snapshot.resend_in_flight {
        line.push_str("  (resending...)");
    }
    line
}

pub fn render_notice(notice: &Notice) -> String {
    format!("{}: {}", notice.title, notice.message)
}

/// Line-driven screen around a mounted session
pub struct Screen<A: OtpApiTrait + 'static> {
    session: Arc<OtpSession<A>>,
    tasks: JoinSet<Option<String>>,
    resend_announced: bool,
}

impl<A: OtpApiTrait + 'static> Screen<A> {
    pub fn new(session: Arc<OtpSession<A>>) -> Self {
        let resend_announced = session.snapshot().resend_available;
        Self {
            session,
            tasks: JoinSet::new(),
            resend_announced,
        }
    }

    /// Read command lines until the code is accepted, the user quits, or
    /// the sender side closes; the session is unmounted on return
    pub async fn run<W>(mut self, mut lines: mpsc::Receiver<String>, mut output: W) -> Result<Exit>
    where
        W: AsyncWrite + Unpin,
    {
        let mut updates = self.session.subscribe();
        let slots = self.session.snapshot().digits.len();
        let mut input_open = true;

        say(&mut output, &format!("Enter the {}-digit code sent to {}", slots, self.session.email())).await?;
        say(&mut output, HELP).await?;
        say(&mut output, &render(&self.session.snapshot())).await?;

        let exit = loop {
            tokio::select! {
                line = lines.recv(), if input_open => match line {
                    Some(line) => match Command::parse(&line, slots) {
                        Ok(Command::Quit) => break Exit::Quit,
                        Ok(command) => self.apply(command, &mut output).await?,
                        Err(e) => say(&mut output, &e.to_string()).await?,
                    },
                    None => {
                        debug!(event = "screen_input_closed", "Input closed");
                        input_open = false;
                    }
                },
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => match joined {
                    Ok(Some(message)) => say(&mut output, &message).await?,
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "Request task failed"),
                },
                changed = updates.changed() => {
                    if changed.is_err() {
                        break Exit::InputClosed;
                    }
                    let available = updates.borrow_and_update().resend_available;
                    if available && !self.resend_announced {
                        say(&mut output, "Time is up! Type r to resend the code.").await?;
                    }
                    self.resend_announced = available;
                }
            }

            if self.flush(&mut output).await? {
                break Exit::Verified;
            }
            if !input_open && self.tasks.is_empty() {
                break Exit::InputClosed;
            }
        };

        self.session.unmount();
        self.tasks.shutdown().await;
        output.flush().await?;
        Ok(exit)
    }

    async fn apply<W>(&mut self, command: Command, output: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match command {
            Command::Paste(code) => {
                if !self.session.paste(&code) {
                    let expected = self.session.snapshot().digits.len();
                    say(output, &format!("Expected exactly {} digits", expected)).await?;
                }
            }
            Command::SetDigit { index, text } => {
                if !self.session.set_digit(index, &text) {
                    say(output, "A slot holds a single digit").await?;
                }
            }
            Command::Backspace(index) => {
                self.session.backspace(index);
            }
            Command::Clear => self.session.clear(),
            Command::Submit => {
                let session = Arc::clone(&self.session);
                self.tasks
                    .spawn(async move { silent_outcome(session.submit().await.err()) });
            }
            Command::Resend => {
                let session = Arc::clone(&self.session);
                self.tasks
                    .spawn(async move { silent_outcome(session.resend().await.err()) });
            }
            Command::Show | Command::Quit => {}
        }

        say(output, &render(&self.session.snapshot())).await
    }

    /// Print the pending alert; `true` once navigation away was requested
    async fn flush<W>(&self, output: &mut W) -> Result<bool>
    where
        W: AsyncWrite + Unpin,
    {
        if let Some(notice) = self.session.take_notice() {
            say(output, &render_notice(&notice)).await?;
        }
        match self.session.take_navigation() {
            Some(route) => {
                say(output, &format!("Navigating to {:?}", route)).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Message for failures that raise no alert of their own
fn silent_outcome(err: Option<OtpError>) -> Option<String> {
    match err {
        Some(OtpError::Cancelled) | None => None,
        Some(err) if err.notice().is_some() => None,
        Some(err) => Some(err.user_message()),
    }
}

async fn say<W>(output: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fint_core::errors::GatewayError;
    use fint_core::services::{OtpFlowConfig, ResendResponse, VerifyResponse};
    use std::io::Cursor;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::input::spawn_line_reader;

    struct StubApi {
        verify: Result<VerifyResponse, GatewayError>,
        verify_calls: Mutex<Vec<String>>,
    }

    impl StubApi {
        fn new(verify: Result<VerifyResponse, GatewayError>) -> Self {
            Self {
                verify,
                verify_calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl OtpApiTrait for StubApi {
        async fn verify_otp(&self, _email: &str, code: &str) -> Result<VerifyResponse, GatewayError> {
            self.verify_calls.lock().unwrap().push(code.to_string());
            self.verify.clone()
        }

        async fn resend_otp(&self, _email: &str) -> Result<ResendResponse, GatewayError> {
            Ok(ResendResponse {
                message: "OTP resent".to_string(),
            })
        }
    }

    async fn run_lines(api: Arc<StubApi>, lines: mpsc::Receiver<String>) -> (Exit, String) {
        let session = Arc::new(
            OtpSession::mount(api, "user@example.com", OtpFlowConfig::default()).unwrap(),
        );
        let mut output = Vec::new();
        let exit = Screen::new(Arc::clone(&session))
            .run(lines, &mut output)
            .await
            .unwrap();
        assert!(session.is_unmounted());
        (exit, String::from_utf8(output).unwrap())
    }

    async fn run_screen(api: Arc<StubApi>, input: &str) -> (Exit, String) {
        let lines = spawn_line_reader(Cursor::new(input.to_string())).unwrap();
        run_lines(api, lines).await
    }

    fn accepted() -> Result<VerifyResponse, GatewayError> {
        Ok(VerifyResponse {
            message: "OK".to_string(),
            token: None,
        })
    }

    #[test]
    fn test_render_marks_focus_and_timer() {
        let snapshot = OtpSnapshot {
            digits: vec!["1".into(), "".into(), "".into(), "".into()],
            focus: 1,
            seconds_remaining: 12,
            resend_available: false,
            resend_in_flight: false,
            submission: fint_core::domain::value_objects::SubmissionState::Idle,
            phase: FlowPhase::Entering,
            can_submit: false,
            notice: None,
            navigation: None,
        };
        assert_eq!(render(&snapshot), "[1] >_< [_] [_]  Time left: 12 sec");
    }

    #[tokio::test]
    async fn test_pasted_code_is_verified() {
        let api = Arc::new(StubApi::new(accepted()));
        let (exit, output) = run_screen(api.clone(), "1234\ns\n").await;

        assert_eq!(exit, Exit::Verified);
        assert!(output.contains("Success: OK"));
        assert!(output.contains("Navigating to Home"));
        assert_eq!(*api.verify_calls.lock().unwrap(), vec!["1234".to_string()]);
    }

    #[tokio::test]
    async fn test_verified_while_input_stays_open() {
        let api = Arc::new(StubApi::new(accepted()));
        let (tx, rx) = mpsc::channel(4);
        tx.send("1234".to_string()).await.unwrap();
        tx.send("s".to_string()).await.unwrap();

        let (exit, output) = tokio::time::timeout(Duration::from_secs(5), run_lines(api, rx))
            .await
            .expect("screen should return without waiting for more input");

        assert_eq!(exit, Exit::Verified);
        assert!(output.contains("Navigating to Home"));
        drop(tx);
    }

    #[tokio::test]
    async fn test_digit_by_digit_entry() {
        let api = Arc::new(StubApi::new(accepted()));
        let (exit, _) = run_screen(api.clone(), "d 1 4\nd 2 3\nd 3 2\nd 4 1\ns\n").await;

        assert_eq!(exit, Exit::Verified);
        assert_eq!(*api.verify_calls.lock().unwrap(), vec!["4321".to_string()]);
    }

    #[tokio::test]
    async fn test_incomplete_code_alert() {
        let api = Arc::new(StubApi::new(accepted()));
        let (exit, output) = run_screen(api.clone(), "12\nd 1 1\ns\n").await;

        assert_eq!(exit, Exit::InputClosed);
        assert!(output.contains("Expected exactly 4 digits"));
        assert!(output.contains("Invalid OTP: Please enter a 4-digit OTP."));
        assert!(api.verify_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_code_alert() {
        let api = Arc::new(StubApi::new(Err(GatewayError::Rejected {
            status: 400,
            message: None,
        })));
        let (exit, output) = run_screen(api, "1234\ns\n").await;

        assert_eq!(exit, Exit::InputClosed);
        assert!(output.contains("Error: Invalid OTP"));
        assert!(!output.contains("Navigating"));
    }

    #[tokio::test]
    async fn test_resend_before_countdown_is_reported() {
        let api = Arc::new(StubApi::new(accepted()));
        let (exit, output) = run_screen(api, "r\n").await;

        assert_eq!(exit, Exit::InputClosed);
        assert!(output.contains("Resend is not available for another"));
    }

    #[tokio::test]
    async fn test_quit_and_bad_input() {
        let api = Arc::new(StubApi::new(accepted()));
        let (exit, output) = run_screen(api, "d 9 1\nhello\nq\n1234\n").await;

        assert_eq!(exit, Exit::Quit);
        assert!(output.contains("Slot must be between 1 and 4"));
        assert!(output.contains("Unknown command: hello"));
        assert!(!output.contains("[1] [2] [3] >4<"));
    }
}
