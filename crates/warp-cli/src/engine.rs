//! Built-in engine for the CLI host
//!
//! No tunnel backend is linked into this binary. The idle engine reports
//! the parameters it was started with and holds the session open until it
//! is cancelled, which is enough to exercise the full start/stop path from
//! a terminal.

use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};
use warp_core::{CancellationToken, Engine, Options};

/// Engine that waits for cancellation
#[derive(Debug, Clone)]
pub struct IdleEngine {
    heartbeat: Duration,
}

impl Default for IdleEngine {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl IdleEngine {
    /// Create an idle engine that logs a heartbeat every `heartbeat`
    pub fn new(heartbeat: Duration) -> Self {
        Self { heartbeat }
    }

    async fn idle(&self, cancel: CancellationToken) {
        let mut ticker = interval(self.heartbeat);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => debug!("Session idle, waiting for stop"),
            }
        }
    }
}

impl Engine for IdleEngine {
    fn run(&self, options: &Options, cancel: CancellationToken) -> anyhow::Result<()> {
        info!(
            bind = ?options.bind_socket_addr(),
            endpoint = ?options.endpoint_ip(),
            psiphon = options.psiphon_enabled,
            gool = options.gool_enabled,
            scan = options.scan_enabled,
            "No tunnel backend linked, holding session open"
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        runtime.block_on(self.idle(cancel));

        info!("Idle engine cancelled");
        Ok(())
    }
}
