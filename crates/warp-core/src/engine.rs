//! Engine contract
//!
//! The tunnel/proxy engine lives outside this crate. A [`Session`] hands it
//! validated [`Options`] and a cancellation token and blocks until it
//! returns.
//!
//! [`Session`]: crate::session::Session

use crate::options::Options;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A tunnel/proxy engine that runs until cancelled or failed
pub trait Engine: Send + Sync {
    /// Run the engine with validated options.
    ///
    /// Must return promptly once `cancel` is cancelled. Cancellation is
    /// cooperative: poll [`CancellationToken::is_cancelled`] or await
    /// [`CancellationToken::cancelled`].
    fn run(&self, options: &Options, cancel: CancellationToken) -> anyhow::Result<()>;
}

/// Engine backed by a closure, see [`from_fn`]
#[derive(Clone)]
pub struct FnEngine<F>(F);

impl<F> std::fmt::Debug for FnEngine<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEngine").finish_non_exhaustive()
    }
}

/// Wrap a closure as an [`Engine`]
pub fn from_fn<F>(f: F) -> FnEngine<F>
where
    F: Fn(&Options, CancellationToken) -> anyhow::Result<()> + Send + Sync,
{
    FnEngine(f)
}

impl<F> Engine for FnEngine<F>
where
    F: Fn(&Options, CancellationToken) -> anyhow::Result<()> + Send + Sync,
{
    fn run(&self, options: &Options, cancel: CancellationToken) -> anyhow::Result<()> {
        (self.0)(options, cancel)
    }
}

impl<E: Engine + ?Sized> Engine for Arc<E> {
    fn run(&self, options: &Options, cancel: CancellationToken) -> anyhow::Result<()> {
        (**self).run(options, cancel)
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn run(&self, options: &Options, cancel: CancellationToken) -> anyhow::Result<()> {
        (**self).run(options, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_engine() {
        let engine = from_fn(|options: &Options, _cancel: CancellationToken| {
            anyhow::ensure!(options.verbose, "not verbose");
            Ok(())
        });
        let options = Options {
            verbose: true,
            ..Options::default()
        };
        assert!(engine.run(&options, CancellationToken::new()).is_ok());
        assert!(engine.run(&Options::default(), CancellationToken::new()).is_err());
    }

    #[test]
    fn test_boxed_engine_forwards() {
        let engine: Box<dyn Engine> = Box::new(from_fn(|_: &Options, cancel: CancellationToken| {
            anyhow::ensure!(cancel.is_cancelled(), "still running");
            Ok(())
        }));
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(engine.run(&Options::default(), cancel).is_ok());
    }
}
