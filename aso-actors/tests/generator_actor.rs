use aso_actors::{
    actor::{self, Actor, Context},
    builder::Builder,
    system::ActorSystem,
    GenerateCmd, GeneratorActor,
};
use aso_common::{
    catalog::{ApplicationType, CountryCode, Kpi, Language, OptimizationTarget, Store},
    AppProfile, AsoError,
};
use aso_generation::{mock, mock::MockGenerator, GenerationRequest};
use std::{sync::Arc, time::Duration};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

fn request() -> GenerationRequest {
    GenerationRequest::Initial {
        profile: AppProfile {
            app_id: "com.example.tasks".into(),
            store: Store::Google,
            language: Language::German,
            country_code: CountryCode::new("DE"),
            kpi: Kpi::Visibility,
            optimization: OptimizationTarget::LongDescription,
            application_type: ApplicationType::Direct,
            instructions: "Stress privacy".into(),
            suggest_keywords: false,
        },
    }
}

fn cmd(
    cancel: CancellationToken,
) -> (
    GenerateCmd,
    oneshot::Receiver<aso_common::Result<aso_generation::SuggestionOutput>>,
) {
    let (reply, rx) = oneshot::channel();
    (
        GenerateCmd {
            id: Uuid::new_v4(),
            request: request(),
            cancel,
            reply,
        },
        rx,
    )
}

#[tokio::test]
async fn generator_actor_replies_with_payload() -> anyhow::Result<()> {
    let actor::ActorHandle { addr, task } =
        actor::spawn_actor(GeneratorActor::new(Arc::new(MockGenerator::instant())), 2);

    let (msg, rx) = cmd(CancellationToken::new());
    addr.send(msg).await.map_err(|_| anyhow::anyhow!("mailbox closed"))?;
    let output = rx.await??;
    assert_eq!(output, mock::initial_payload());

    task.abort();
    Ok(())
}

#[tokio::test]
async fn cancelled_call_resolves_early() -> anyhow::Result<()> {
    let generator = MockGenerator::new(Duration::from_secs(30));
    let actor::ActorHandle { addr, task } =
        actor::spawn_actor(GeneratorActor::new(Arc::new(generator)), 2);

    let token = CancellationToken::new();
    let (msg, rx) = cmd(token.clone());
    addr.send(msg).await.map_err(|_| anyhow::anyhow!("mailbox closed"))?;
    token.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), rx).await??;
    assert!(matches!(result, Err(AsoError::Cancelled)));

    task.abort();
    Ok(())
}

struct Probe(oneshot::Sender<&'static str>);

struct ProbeActor {
    seen: Vec<&'static str>,
}

#[async_trait::async_trait]
impl Actor for ProbeActor {
    type Msg = Probe;

    async fn handle(&mut self, msg: Self::Msg, _ctx: &mut Context<Self>) -> anyhow::Result<()> {
        self.seen.push("probe");
        let _ = msg.0.send("pong");
        Ok(())
    }
}

#[tokio::test]
async fn builder_wires_reserved_actors_and_shuts_down() -> anyhow::Result<()> {
    let mut builder = Builder::new();
    let reserved = builder.reserve::<ProbeActor>("probe", 4);
    let addr = builder
        .addr::<ProbeActor>("probe")
        .ok_or_else(|| anyhow::anyhow!("probe not published"))?;
    builder.start_reserved(reserved, ProbeActor { seen: Vec::new() })?;

    let (tx, rx) = oneshot::channel();
    addr.send(Probe(tx))
        .await
        .map_err(|_| anyhow::anyhow!("mailbox closed"))?;
    assert_eq!(rx.await?, "pong");

    builder.spawn("generator", 2, || {
        GeneratorActor::new(Arc::new(MockGenerator::instant()))
    });
    assert!(builder.addr::<GeneratorActor>("generator").is_some());
    assert!(builder.addr::<ProbeActor>("generator").is_none());

    tokio::time::timeout(Duration::from_secs(5), builder.graceful_shutdown()).await??;
    Ok(())
}

#[tokio::test]
async fn reserved_actor_keeps_name_and_capacity() {
    let reserved = actor::spawn_actor_reserved::<ProbeActor>("probe", 1);
    assert_eq!(reserved.name(), "probe");
    let handle = reserved.start(ProbeActor { seen: Vec::new() }).unwrap();
    assert_eq!(handle.addr.capacity(), 1);
    handle.task.abort();
}

/// Stops itself on the first message and reports whether the stop was seen.
struct OneShotActor(Option<oneshot::Sender<bool>>);

#[async_trait::async_trait]
impl Actor for OneShotActor {
    type Msg = ();

    async fn handle(&mut self, _msg: (), ctx: &mut Context<Self>) -> anyhow::Result<()> {
        assert!(!ctx.is_stopping());
        ctx.stop();
        if let Some(tx) = self.0.take() {
            let _ = tx.send(ctx.is_stopping());
        }
        Ok(())
    }
}

#[tokio::test]
async fn stopped_actor_closes_its_mailbox() -> anyhow::Result<()> {
    let (tx, rx) = oneshot::channel();
    let actor::ActorHandle { addr, task } = actor::spawn_actor(OneShotActor(Some(tx)), 2);
    assert!(!addr.is_closed());

    addr.send(()).await.map_err(|_| anyhow::anyhow!("mailbox closed"))?;
    assert!(rx.await?);

    tokio::time::timeout(Duration::from_secs(5), task).await???;
    assert!(addr.is_closed());
    assert!(addr.try_send(()).is_err());
    Ok(())
}

#[tokio::test]
async fn actor_system_tracks_tasks_until_shutdown() {
    let mut system = ActorSystem::new();
    let mut first = system.shutdown_notifier();
    let mut second = system.shutdown_notifier();
    system.track(async move {
        let _ = first.recv().await;
        Ok(())
    });
    system.track(async move {
        let _ = second.recv().await;
        Err(anyhow::anyhow!("worker failed"))
    });
    assert_eq!(system.running(), 2);

    let err = tokio::time::timeout(Duration::from_secs(5), system.graceful_shutdown())
        .await
        .expect("shutdown finishes")
        .unwrap_err();
    assert_eq!(err.to_string(), "worker failed");
}
