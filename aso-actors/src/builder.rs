use crate::actor::{
    spawn_actor_reserved, spawn_actor_with_shutdown, Actor, ActorHandle, Addr, Reserved,
};
use crate::system::{ActorSystem, ShutdownHandle};
use anyhow::Result;
use std::any::Any;
use std::collections::HashMap;

pub struct Builder {
    sys: ActorSystem,
    // Concrete addresses by name for wiring.
    addrs: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            sys: ActorSystem::new(),
            addrs: HashMap::new(),
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.sys.shutdown_handle()
    }

    /// Reserve an actor and publish its `Addr` under `name`.
    pub fn reserve<A>(&mut self, name: &str, mailbox: usize) -> Reserved<A>
    where
        A: Actor,
        Addr<A>: Send + Sync,
    {
        let r = spawn_actor_reserved::<A>(name, mailbox);
        self.addrs.insert(name.to_string(), Box::new(r.addr()));
        r
    }

    /// Start a previously reserved actor and track its task.
    pub fn start_reserved<A>(&mut self, r: Reserved<A>, actor: A) -> Result<&mut Self>
    where
        A: Actor,
    {
        let name = r.name().to_string();
        let shutdown_rx = self.sys.shutdown_notifier();
        let h = r.start_with_shutdown(actor, Some(shutdown_rx))?;
        tracing::debug!(actor = %name, "actor started");
        self.sys.track(async move {
            h.task.await??;
            Ok(())
        });
        Ok(self)
    }

    /// Spawn an actor and publish its `Addr` under `name`.
    pub fn spawn<A, F>(&mut self, name: &str, mailbox: usize, new: F) -> &mut Self
    where
        A: Actor,
        F: FnOnce() -> A,
        Addr<A>: Send + Sync,
    {
        let shutdown_rx = self.sys.shutdown_notifier();
        let h: ActorHandle<A> = spawn_actor_with_shutdown(new(), mailbox, Some(shutdown_rx));
        self.addrs.insert(name.to_string(), Box::new(h.addr.clone()));
        tracing::debug!(actor = %name, "actor spawned");
        self.sys.track(async move {
            h.task.await??;
            Ok(())
        });
        self
    }

    /// Get a typed address by name.
    pub fn addr<A: Actor>(&self, name: &str) -> Option<Addr<A>> {
        self.addrs
            .get(name)
            .and_then(|b| b.downcast_ref::<Addr<A>>().cloned())
    }

    pub async fn graceful_shutdown(mut self) -> Result<()> {
        self.addrs.clear();
        self.sys.graceful_shutdown().await
    }

    /// Block until CTRL-C or a [`ShutdownHandle`] signal, then shut
    /// everything down.
    pub async fn run_until_ctrl_c(mut self) -> Result<()> {
        let mut shutdown_rx = self.sys.shutdown_notifier();
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("ctrl-c received");
            }
            _ = shutdown_rx.recv() => {
                tracing::info!("shutdown requested");
            }
        }
        // Drop published addresses so actor mailboxes close.
        self.addrs.clear();
        self.sys.graceful_shutdown().await
    }
}
