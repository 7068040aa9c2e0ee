use anyhow::{Result, anyhow};
use aso_actors::{GENERATOR_MAILBOX, GeneratorActor, actor::Addr, builder::Builder};
use aso_config::AsoConfig;
use aso_generation::ensure_generator_ready;
use aso_tui::{TuiActor, spawn_tui_feeders};

const TUI_MAILBOX: usize = 256;
const GENERATOR_NAME: &str = "generator:main";
const TUI_NAME: &str = "tui:main";

pub struct Wiring {
    builder: Builder,
}

impl Wiring {
    pub fn new() -> Self {
        Self {
            builder: Builder::new(),
        }
    }
    pub fn builder_mut(&mut self) -> &mut Builder {
        &mut self.builder
    }
    pub async fn run(self) -> Result<()> {
        self.builder.run_until_ctrl_c().await
    }
}

pub async fn build_from_config(w: &mut Wiring, cfg: AsoConfig) -> Result<()> {
    // Fail before touching the terminal if the backend is misconfigured.
    let generator = ensure_generator_ready(&cfg.generator)?;

    let b = w.builder_mut();
    let shutdown = b.shutdown_handle();

    // -------- PHASE 1: RESERVE --------
    let r_generator = b.reserve::<GeneratorActor>(GENERATOR_NAME, GENERATOR_MAILBOX);
    // ui (start last)
    let r_tui = b.reserve::<TuiActor>(TUI_NAME, TUI_MAILBOX);

    // -------- PHASE 2: START BACKENDS --------
    let generator = GeneratorActor::new(generator);
    tracing::info!(generator = generator.generator_name(), "starting generator actor");
    b.start_reserved(r_generator, generator)?;

    // -------- PHASE 3: START TUI LAST --------
    let generator_addr: Addr<GeneratorActor> = b
        .addr(GENERATOR_NAME)
        .ok_or_else(|| anyhow!("generator actor was not registered"))?;

    let tui = TuiActor::new(generator_addr, cfg.wizard.country_input, shutdown.clone())?;
    b.start_reserved(r_tui, tui)?;

    let tui_addr: Addr<TuiActor> = b
        .addr(TUI_NAME)
        .ok_or_else(|| anyhow!("tui actor was not registered"))?;
    spawn_tui_feeders(tui_addr, shutdown);

    Ok(())
}
