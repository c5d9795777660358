//! Session lifecycle
//!
//! A [`Session`] is one cancellable run of an [`Engine`]. The host calls
//! [`Session::start`] on a background thread, which blocks for the lifetime
//! of the run, and [`Session::stop`] (or a [`StopHandle`]) from any other
//! thread to end it early.
//!
//! ```text
//! Created --start ok--> Running --engine returns--> Terminated
//!    ^                                                   |
//!    +-- start rejected (bad command)     start again -> SessionTerminated
//! ```

use crate::command;
use crate::engine::Engine;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not started, or the last start was rejected
    Created,
    /// Engine is running
    Running,
    /// Engine returned; the session cannot be reused
    Terminated,
}

impl SessionState {
    /// Human readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Created => "Created",
            SessionState::Running => "Running",
            SessionState::Terminated => "Terminated",
        }
    }
}

/// Cloneable handle that stops a session from another thread
#[derive(Debug, Clone)]
pub struct StopHandle {
    cancel: CancellationToken,
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request termination.
    ///
    /// The session's token is cancelled by the first call only. Callers
    /// should stop a session once; later calls are ignored.
    pub fn stop(&self) {
        if self.requested.swap(true, Ordering::AcqRel) {
            debug!("Stop already requested, ignoring");
            return;
        }
        info!("Stop requested, cancelling session");
        self.cancel.cancel();
    }

    /// Whether stop has been requested
    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Marks the session terminated when the run ends, including by panic.
struct TerminateOnExit<'a>(&'a Mutex<SessionState>);

impl Drop for TerminateOnExit<'_> {
    fn drop(&mut self) {
        *self.0.lock() = SessionState::Terminated;
    }
}

/// One managed, cancellable engine run
pub struct Session<E> {
    engine: E,
    state: Mutex<SessionState>,
    command: Mutex<Option<String>>,
    stop: StopHandle,
}

impl<E: Engine> Session<E> {
    /// Create a session around an engine
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: Mutex::new(SessionState::Created),
            command: Mutex::new(None),
            stop: StopHandle::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Command string of the accepted start, if any
    pub fn command(&self) -> Option<String> {
        self.command.lock().clone()
    }

    /// Handle for stopping this session from another thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Whether stop has been requested
    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_stop_requested()
    }

    /// Request termination of the run.
    ///
    /// Precondition: call at most once, after the session was created and
    /// before it terminated. A stop issued before [`start`](Self::start)
    /// leaves the token cancelled, so the engine sees it immediately.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Parse `raw_command`, run the engine with it and block until it returns.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyRunning`] / [`Error::SessionTerminated`] when the
    ///   session is not in [`SessionState::Created`].
    /// - Tokenizer, parser and validator errors. Nothing is started and the
    ///   session stays `Created`, so a corrected command can be retried.
    /// - [`Error::Engine`] with the engine's error, unchanged.
    pub fn start(&self, raw_command: &str) -> Result<()> {
        self.ensure_created()?;

        let options = command::parse(raw_command).map_err(|e| {
            warn!(error = %e, "Rejected session command");
            e
        })?;

        {
            let mut state = self.state.lock();
            match *state {
                SessionState::Created => *state = SessionState::Running,
                SessionState::Running => return Err(Error::AlreadyRunning),
                SessionState::Terminated => return Err(Error::SessionTerminated),
            }
        }
        let _terminate = TerminateOnExit(&self.state);
        *self.command.lock() = Some(raw_command.to_string());

        info!(
            bind = %options.bind_address,
            endpoint = %options.endpoint,
            psiphon = options.psiphon_enabled,
            country = %options.country,
            gool = options.gool_enabled,
            scan = options.scan_enabled,
            rtt_ms = options.rtt_threshold_ms,
            verbose = options.verbose,
            "Session started"
        );

        match self.engine.run(&options, self.stop.token()) {
            Ok(()) => {
                info!(stopped = self.is_stop_requested(), "Session finished");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, stopped = self.is_stop_requested(), "Engine failed");
                Err(Error::Engine(e))
            }
        }
    }

    fn ensure_created(&self) -> Result<()> {
        match *self.state.lock() {
            SessionState::Created => Ok(()),
            SessionState::Running => Err(Error::AlreadyRunning),
            SessionState::Terminated => Err(Error::SessionTerminated),
        }
    }
}

impl<E> std::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &*self.state.lock())
            .field("stop_requested", &self.stop.is_stop_requested())
            .finish_non_exhaustive()
    }
}
