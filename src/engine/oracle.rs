//! Optional narrative enrichment.
//!
//! The engine never depends on an oracle: every request has a deterministic
//! fallback, and the [`Narrator`] swallows oracle failures after logging
//! them. Oracle replies only ever replace text, never game numbers.

use std::fmt;
use std::io::{self, ErrorKind, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::ORACLE_TIMEOUT_MS;
use crate::error::OracleError;
use crate::game::{Action, Actor, Crisis, Tension};

/// What a request asks the oracle to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentKind {
    /// Embellished opening crisis description.
    CrisisDescription,
    /// Dramatic account of a resolved action, as JSON.
    ActionReport,
    /// Recommendations for the player, as JSON.
    AdvisorBrief,
    /// Advisor reply to a player question, as JSON.
    Discussion,
}

/// One request to a [`NarrativeOracle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichmentRequest {
    /// Kind of text wanted.
    pub kind: EnrichmentKind,
    /// Role instructions.
    pub system: String,
    /// The situation to write about.
    pub prompt: String,
}

impl EnrichmentRequest {
    /// Ask for a dramatized crisis description. The reply is used verbatim.
    #[must_use]
    pub fn crisis(crisis: &Crisis) -> Self {
        let consequences = crisis
            .consequences
            .iter()
            .map(|c| format!("- {c}"))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            kind: EnrichmentKind::CrisisDescription,
            system: "You are a breaking-news correspondent covering an Arctic geopolitical crisis. \
                     Write one tense, factual paragraph in present tense."
                .to_string(),
            prompt: format!(
                "CRISIS: {}\nBACKGROUND: {}\nCONSEQUENCES:\n{consequences}\n\n\
                 Rewrite the background as a single dramatic news paragraph.",
                crisis.name, crisis.description
            ),
        }
    }

    /// Ask for a dramatic action report as JSON
    /// `{"dramatic_description": .., "tactical_details": ..}`.
    #[must_use]
    pub fn action_report(actor: Actor, action: &Action, success: bool, tension: Tension) -> Self {
        let outcome = if success { "SUCCESS" } else { "FAILURE" };
        Self {
            kind: EnrichmentKind::ActionReport,
            system: "You are a military correspondent reporting on Arctic operations. \
                     Write in present tense with concrete tactical detail."
                .to_string(),
            prompt: format!(
                "OPERATION REPORT:\nNation: {actor}\nOperation: {}\nType: {}\nOutcome: {outcome}\n\
                 Description: {}\nTension Level: {tension} ({})\n\n\
                 Respond in JSON format:\n\
                 {{\"dramatic_description\": \"one vivid sentence\", \"tactical_details\": \"assets and execution\"}}",
                action.name,
                action.kind,
                action.description,
                tension.tier().label()
            ),
        }
    }
}

/// Source of free-form narrative text.
pub trait NarrativeOracle: Send {
    /// Answer one request.
    ///
    /// # Errors
    ///
    /// [`OracleError::Unavailable`] disables the oracle for the rest of the
    /// game; other errors fail only this request.
    fn enrich(&mut self, request: &EnrichmentRequest) -> Result<String, OracleError>;
}

/// Wraps an optional oracle with retries and permanent degradation.
pub struct Narrator {
    oracle: Option<Box<dyn NarrativeOracle>>,
    retries: u32,
}

impl Narrator {
    /// A narrator that always uses fallback text.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            oracle: None,
            retries: 0,
        }
    }

    /// A narrator backed by `oracle`, retrying failed requests `retries` times.
    #[must_use]
    pub fn new(oracle: Box<dyn NarrativeOracle>, retries: u32) -> Self {
        Self {
            oracle: Some(oracle),
            retries,
        }
    }

    /// Whether an oracle is still attached.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.oracle.is_some()
    }

    /// Free-form text, or `None` when offline or every attempt failed.
    pub fn enrich(&mut self, request: &EnrichmentRequest) -> Option<String> {
        self.attempt(request, |text| {
            let text = text.trim();
            if text.is_empty() {
                Err(OracleError::Malformed("empty reply".into()))
            } else {
                Ok(text.to_string())
            }
        })
    }

    /// A JSON reply decoded into `T`.
    ///
    /// Prose around the object is ignored: decoding starts at the first `{`
    /// and ends at the last `}`.
    pub fn enrich_json<T: DeserializeOwned>(&mut self, request: &EnrichmentRequest) -> Option<T> {
        self.attempt(request, |text| {
            let object = json_object(text)
                .ok_or_else(|| OracleError::Malformed("no JSON object in reply".into()))?;
            serde_json::from_str(object).map_err(|e| OracleError::Malformed(e.to_string()))
        })
    }

    fn attempt<T>(
        &mut self,
        request: &EnrichmentRequest,
        parse: impl Fn(&str) -> Result<T, OracleError>,
    ) -> Option<T> {
        let oracle = self.oracle.as_mut()?;
        let mut attempts = 0;
        loop {
            match oracle.enrich(request).and_then(|text| parse(&text)) {
                Ok(value) => return Some(value),
                Err(OracleError::Unavailable(reason)) => {
                    warn!(kind = ?request.kind, %reason, "narrative oracle unavailable, continuing offline");
                    self.oracle = None;
                    return None;
                }
                Err(err @ OracleError::Timeout(_)) => {
                    warn!(kind = ?request.kind, %err, "oracle too slow, using fallback text");
                    return None;
                }
                Err(err) if attempts < self.retries => {
                    attempts += 1;
                    warn!(kind = ?request.kind, %err, attempt = attempts, "retrying oracle request");
                }
                Err(err) => {
                    warn!(kind = ?request.kind, %err, "oracle request failed, using fallback text");
                    return None;
                }
            }
        }
    }
}

impl fmt::Debug for Narrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Narrator")
            .field("online", &self.is_online())
            .field("retries", &self.retries)
            .finish()
    }
}

impl Default for Narrator {
    fn default() -> Self {
        Self::offline()
    }
}

fn json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Default time an oracle command gets to answer one request.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_millis(ORACLE_TIMEOUT_MS);

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Oracle that pipes each request, as JSON, to an external command and
/// reads the reply from its stdout.
///
/// A command that has not answered within its timeout is killed and the
/// request fails with [`OracleError::Timeout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandOracle {
    /// Build from a command line, program first.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Unavailable`] for an empty command line.
    pub fn from_command_line(command: &[String]) -> Result<Self, OracleError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| OracleError::Unavailable("empty oracle command".into()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout: DEFAULT_ORACLE_TIMEOUT,
        })
    }

    /// Replace the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn spawn(&self) -> Result<Child, OracleError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    OracleError::Unavailable(format!("{}: {e}", self.program))
                }
                _ => OracleError::Failed(format!("{}: {e}", self.program)),
            })
    }
}

/// Outcome of feeding the child its request and draining its stdout.
struct Exchange {
    written: io::Result<()>,
    output: io::Result<Vec<u8>>,
}

impl NarrativeOracle for CommandOracle {
    fn enrich(&mut self, request: &EnrichmentRequest) -> Result<String, OracleError> {
        let payload =
            serde_json::to_vec(request).map_err(|e| OracleError::Failed(e.to_string()))?;
        let deadline = Instant::now() + self.timeout;
        let mut child = self.spawn()?;

        // Pipe I/O runs off-thread so a silent child cannot block past the
        // deadline. The thread ends once the child is killed.
        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let written = stdin.map_or(Ok(()), |mut pipe| pipe.write_all(&payload));
            let mut buf = Vec::new();
            let output = if written.is_ok() {
                stdout
                    .map_or(Ok(0), |mut pipe| pipe.read_to_end(&mut buf))
                    .map(|_| buf)
            } else {
                Ok(buf)
            };
            let _ = tx.send(Exchange { written, output });
        });

        let exchange = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(exchange) => exchange,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                reap(&mut child);
                return Err(OracleError::Timeout(self.timeout));
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                reap(&mut child);
                return Err(OracleError::Failed("oracle pipe thread vanished".into()));
            }
        };

        if let Err(e) = exchange.written {
            reap(&mut child);
            return Err(OracleError::Failed(format!("writing request: {e}")));
        }
        let stdout = match exchange.output {
            Ok(stdout) => stdout,
            Err(e) => {
                reap(&mut child);
                return Err(OracleError::Failed(format!("reading reply: {e}")));
            }
        };

        let status = wait_until(&mut child, deadline, self.timeout)?;
        if !status.success() {
            return Err(OracleError::Failed(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        String::from_utf8(stdout).map_err(|e| OracleError::Malformed(e.to_string()))
    }
}

/// Wait for `child` to exit, killing it once `deadline` passes.
fn wait_until(
    child: &mut Child,
    deadline: Instant,
    timeout: Duration,
) -> Result<ExitStatus, OracleError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if Instant::now() >= deadline => {
                reap(child);
                return Err(OracleError::Timeout(timeout));
            }
            Ok(None) => thread::sleep(EXIT_POLL_INTERVAL),
            Err(e) => {
                reap(child);
                return Err(OracleError::Failed(e.to_string()));
            }
        }
    }
}

/// Kill and collect `child`. Either call fails harmlessly once it has exited.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays canned replies and counts calls.
    struct Scripted {
        replies: VecDeque<Result<String, OracleError>>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn boxed(
            replies: Vec<Result<String, OracleError>>,
        ) -> (Box<dyn NarrativeOracle>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let oracle = Self {
                replies: replies.into(),
                calls: Arc::clone(&calls),
            };
            (Box::new(oracle), calls)
        }
    }

    impl NarrativeOracle for Scripted {
        fn enrich(&mut self, _request: &EnrichmentRequest) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .pop_front()
                .unwrap_or_else(|| Err(OracleError::Failed("script exhausted".into())))
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        text: String,
    }

    fn request() -> EnrichmentRequest {
        EnrichmentRequest::crisis(&crate::game::CRISES[0])
    }

    #[test]
    fn test_offline_narrator_returns_nothing() {
        let mut narrator = Narrator::offline();
        assert!(!narrator.is_online());
        assert!(narrator.enrich(&request()).is_none());
    }

    #[test]
    fn test_retry_then_success() {
        let (oracle, calls) = Scripted::boxed(vec![
            Err(OracleError::Failed("timeout".into())),
            Ok("Ice groans under the tanker.".into()),
        ]);
        let mut narrator = Narrator::new(oracle, 1);
        assert_eq!(
            narrator.enrich(&request()).as_deref(),
            Some("Ice groans under the tanker.")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_retries_are_bounded() {
        let (oracle, calls) = Scripted::boxed(vec![]);
        let mut narrator = Narrator::new(oracle, 2);
        assert!(narrator.enrich(&request()).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(narrator.is_online());
    }

    #[test]
    fn test_unavailable_disables_oracle() {
        let (oracle, calls) = Scripted::boxed(vec![
            Err(OracleError::Unavailable("no credentials".into())),
            Ok("never read".into()),
        ]);
        let mut narrator = Narrator::new(oracle, 3);
        assert!(narrator.enrich(&request()).is_none());
        assert!(!narrator.is_online());
        assert!(narrator.enrich(&request()).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_json_reply_with_surrounding_prose() {
        let (oracle, _) = Scripted::boxed(vec![Ok(
            "Here you go:\n```json\n{\"text\": \"aurora\"}\n```".into(),
        )]);
        let mut narrator = Narrator::new(oracle, 0);
        let reply: Option<Reply> = narrator.enrich_json(&request());
        assert_eq!(
            reply,
            Some(Reply {
                text: "aurora".into()
            })
        );
    }

    #[test]
    fn test_malformed_json_is_retried() {
        let (oracle, calls) = Scripted::boxed(vec![
            Ok("no braces here".into()),
            Ok("{\"text\": \"second\"}".into()),
        ]);
        let mut narrator = Narrator::new(oracle, 1);
        let reply: Option<Reply> = narrator.enrich_json(&request());
        assert_eq!(reply.map(|r| r.text).as_deref(), Some("second"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_command_line_is_unavailable() {
        assert!(matches!(
            CommandOracle::from_command_line(&[]),
            Err(OracleError::Unavailable(_))
        ));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let mut oracle =
            CommandOracle::from_command_line(&["/nonexistent/arctic-oracle".to_string()]).unwrap();
        assert!(matches!(
            oracle.enrich(&request()),
            Err(OracleError::Unavailable(_))
        ));
    }

    #[test]
    fn test_timeout_falls_back_without_retry() {
        let (oracle, calls) = Scripted::boxed(vec![
            Err(OracleError::Timeout(Duration::from_secs(1))),
            Ok("too late".into()),
        ]);
        let mut narrator = Narrator::new(oracle, 3);
        assert!(narrator.enrich(&request()).is_none());
        assert!(narrator.is_online());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_hung_command_times_out() {
        let command = ["sh", "-c", "sleep 30"].map(String::from);
        let mut oracle = CommandOracle::from_command_line(&command)
            .unwrap()
            .with_timeout(Duration::from_millis(300));
        let started = Instant::now();
        assert_eq!(
            oracle.enrich(&request()),
            Err(OracleError::Timeout(Duration::from_millis(300)))
        );
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_unread_request_fails_and_kills_child() {
        // Closes stdin at once, then lingers; a large request cannot be written.
        let command = ["sh", "-c", "exec 0<&-; sleep 30"].map(String::from);
        let mut oracle = CommandOracle::from_command_line(&command).unwrap();
        let request = EnrichmentRequest {
            kind: EnrichmentKind::CrisisDescription,
            system: String::new(),
            prompt: "x".repeat(1 << 20),
        };
        let started = Instant::now();
        assert!(matches!(
            oracle.enrich(&request),
            Err(OracleError::Failed(_))
        ));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let command = ["sh", "-c", "cat >/dev/null; exit 3"].map(String::from);
        let mut oracle = CommandOracle::from_command_line(&command).unwrap();
        assert!(matches!(
            oracle.enrich(&request()),
            Err(OracleError::Failed(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_receives_request_json() {
        let mut oracle = CommandOracle::from_command_line(&["cat".to_string()]).unwrap();
        let echoed = oracle.enrich(&request()).unwrap();
        assert!(echoed.contains("\"kind\":\"crisis_description\""));
    }
}
