//! Task tracking and shutdown signalling for the wizard's actors.
//!
//! Actors subscribe to the broadcast channel for cooperative shutdown, while the
//! `JoinSet` ensures spawned tasks are awaited during teardown.
use anyhow::Result;
use tokio::{sync::broadcast, task::JoinSet};

/// Cloneable trigger for a global shutdown, handed to actors that can end
/// the session (the TUI on `/quit`).
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: broadcast::Sender<()>,
}

impl ShutdownHandle {
    pub fn signal(&self) {
        let _ = self.tx.send(());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

pub struct ActorSystem {
    joinset: JoinSet<Result<()>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Default for ActorSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorSystem {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(8);
        Self {
            joinset: JoinSet::new(),
            shutdown_tx,
        }
    }

    pub fn shutdown_notifier(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    pub fn track(&mut self, fut: impl std::future::Future<Output = Result<()>> + Send + 'static) {
        self.joinset.spawn(fut);
    }

    /// Number of tracked tasks still running.
    pub fn running(&self) -> usize {
        self.joinset.len()
    }

    /// Signal shutdown and wait for every tracked task. The first task error
    /// is returned after all tasks have finished.
    pub async fn graceful_shutdown(mut self) -> Result<()> {
        tracing::info!(tasks = self.running(), "shutting down actors");
        let _ = self.shutdown_tx.send(());
        let mut first_err = None;
        while let Some(res) = self.joinset.join_next().await {
            let outcome = match res {
                Ok(inner) => inner,
                Err(join_err) => Err(join_err.into()),
            };
            if let Err(e) = outcome {
                tracing::warn!(error = ?e, "actor task ended with error");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
