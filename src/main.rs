//! Terminal 2048 runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout).

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::Env;
use log::{debug, info};

use tui_2048::config::{Cli, Config};
use tui_2048::core::{ActionOutcome, GameSnapshot, GameState};
use tui_2048::input::{handle_key_event, should_quit, InputGate};
use tui_2048::term::{snapshot_sprites, FrameBuffer, GameView, TerminalRenderer, Transition, Viewport};
use tui_2048::types::TICK_MS;

fn main() -> Result<()> {
    // Anything louder than warn would scribble over the alternate screen.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = Config::load(&Cli::parse()).context("invalid configuration")?;
    info!("starting: seed {}, {}x{}", config.seed, config.size, config.size);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: Config) -> Result<()> {
    let mut game_state = GameState::with_size(config.seed, config.size, config.size)?;

    let view = GameView::default();
    let mut gate = InputGate::with_step_ms(config.step_ms);
    // The last accepted turn. Once its slide has played, the settled frame keeps
    // the merge and spawn highlights until the next move or a restart.
    let mut transition: Option<Transition> = None;

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snap);
        let sprites = match &transition {
            Some(t) => t.sprites_at(gate.current_step()),
            None => snapshot_sprites(&snap),
        };
        view.render_into(&snap, &sprites, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }

                    if let Some(action) = handle_key_event(key).and_then(|a| gate.accept(a)) {
                        let prev = game_state.board().clone();
                        match game_state.apply_action(action) {
                            ActionOutcome::Moved(turn) => {
                                gate.begin_turn(turn.plan.max_travel);
                                let next = game_state.board().clone();
                                transition = Some(Transition::new(prev, turn, next));
                            }
                            ActionOutcome::Restarted => transition = None,
                            ActionOutcome::Rejected => debug!("{} rejected", action.as_str()),
                        }
                    }
                }
                // Key repeats and releases are ignored; one press is one turn.
                Event::Key(_) => {}
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            gate.update(TICK_MS);
        }
    }
}
