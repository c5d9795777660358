//! # warp-core
//!
//! Lets a host (a mobile shell, a CLI, a service wrapper) drive a warp-plus
//! proxy session with a single command string.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Command tokenizer** - shell-like splitting with quotes and escapes
//! - **Options** - typed flags, defaults and validation
//! - **Engine contract** - the trait the tunnel implementation plugs into
//! - **Session** - blocking start, asynchronous stop, cooperative cancellation
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::thread;
//! use warp_core::engine::from_fn;
//! use warp_core::{CancellationToken, Options, Session};
//!
//! let engine = from_fn(|_options: &Options, cancel: CancellationToken| {
//!     while !cancel.is_cancelled() {
//!         thread::sleep(std::time::Duration::from_millis(50));
//!     }
//!     Ok(())
//! });
//!
//! let session = Arc::new(Session::new(engine));
//! let runner = {
//!     let session = Arc::clone(&session);
//!     thread::spawn(move || session.start("-b 127.0.0.1:8086 -e 1.1.1.1"))
//! };
//!
//! session.stop();
//! runner.join().unwrap()?;
//! # Ok::<(), warp_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod engine;
pub mod error;
pub mod options;
pub mod session;

// Re-exports for convenience
pub use command::tokenize;
pub use engine::Engine;
pub use error::{Error, Result};
pub use options::Options;
pub use session::{Session, SessionState, StopHandle};
pub use tokio_util::sync::CancellationToken;
