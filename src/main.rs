//! Terminal 2048 runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output, and an optional
//! chain bridge polled once per frame.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tui_2048::adapter::{ChainBridge, ChainError, ChainEvent, ChainRequest, MemoryChain};
use tui_2048::app::App;
use tui_2048::cli::Args;
use tui_2048::core::{GameSnapshot, GameState};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::TICK_MS;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let mut bridge = start_bridge(&args)?;
    let game = match args.seed {
        Some(seed) => GameState::new(args.size, seed),
        None => GameState::from_entropy(args.size),
    };
    info!(size = args.size, seed = game.seed(), "starting");
    let mut app = App::new(game, args.app_config(bridge.is_some()));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, bridge.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_tracing(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&args.log).context("invalid --log filter")?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn start_bridge(args: &Args) -> Result<Option<ChainBridge>> {
    if args.offline {
        info!("offline mode: scores kept in memory");
        return ChainBridge::start(MemoryChain::default()).map(Some);
    }
    ChainBridge::start_from_env()
}

fn run(
    term: &mut TerminalRenderer,
    app: &mut App,
    mut bridge: Option<&mut ChainBridge>,
) -> Result<()> {
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let tick = Duration::from_millis(u64::from(TICK_MS));

    loop {
        // Chain results first, so the frame shows them.
        if let Some(bridge) = bridge.as_deref_mut() {
            while let Some(event) = bridge.try_recv() {
                let follow_up = app.handle_chain_event(event);
                dispatch(app, bridge, follow_up);
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        app.snapshot_into(&mut snap);
        GameView::fit(snap.board.size(), viewport).render_into(
            &snap,
            &app.hud(),
            viewport,
            &mut fb,
        );
        term.draw_swap(&mut fb)?;

        if !event::poll(tick)? {
            continue;
        }
        let request = match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(_, _) => {
                app.cancel_swipe();
                term.invalidate();
                None
            }
            _ => None,
        };
        if app.should_quit() {
            return Ok(());
        }
        if let Some(bridge) = bridge.as_deref_mut() {
            dispatch(app, bridge, request);
        }
    }
}

fn dispatch(app: &mut App, bridge: &mut ChainBridge, request: Option<ChainRequest>) {
    let Some(request) = request else {
        return;
    };
    let kind = request.kind();
    if !bridge.request(request) {
        warn!(?kind, "chain worker is gone");
        let follow_up = app.handle_chain_event(ChainEvent::Failed {
            kind,
            error: ChainError::Disabled,
        });
        debug_assert!(follow_up.is_none());
    }
}
