//! Terminal fruit-drop runner (default binary).
//!
//! Fixed-step loop: crossterm input is polled until the next 16 ms tick, the session
//! advances by one tick, and the snapshot is rendered through the diffing renderer.

use std::fs::OpenOptions;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use fruit_drop::audio::{BellAudio, LogAudio};
use fruit_drop::cli::Args;
use fruit_drop::core::{dispatch_cues, AudioSink, GameSession, GameSnapshot, Phase};
use fruit_drop::highscore::HighScoreStore;
use fruit_drop::input::{HostCommand, KeyInput};
use fruit_drop::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use fruit_drop::types::{GameEvent, TICK_MS};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let store = match &args.high_score_file {
        Some(path) => HighScoreStore::new(path),
        None => HighScoreStore::default(),
    };
    log::info!("high score file: {}", store.path().display());
    let mut audio: Box<dyn AudioSink> = if args.bell {
        Box::new(BellAudio::new(std::io::stdout()))
    } else {
        Box::new(LogAudio::default())
    };

    // Reject a bad config before touching the terminal.
    let session = new_session(&args, &store)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args, &store, audio.as_mut(), session);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("run loop failed: {err:#}");
    }
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log_file)
        .with_context(|| format!("open log file {}", args.log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

fn new_session(args: &Args, store: &HighScoreStore) -> Result<GameSession> {
    let config = args
        .session_config(clock_seed(), store.load())
        .context("invalid session configuration")?;
    Ok(GameSession::new(config)?)
}

fn run(
    term: &mut TerminalRenderer,
    args: &Args,
    store: &HighScoreStore,
    audio: &mut dyn AudioSink,
    mut session: GameSession,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::empty(session.mode());

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match KeyInput::from_key(key) {
                    Some(KeyInput::Host(HostCommand::Quit)) => return Ok(()),
                    Some(KeyInput::Host(HostCommand::Start)) => {
                        session.start();
                    }
                    Some(KeyInput::Host(HostCommand::Restart)) => {
                        if session.phase() == Phase::GameOver {
                            session = new_session(args, store)?;
                            log::info!("restarted");
                        }
                    }
                    Some(KeyInput::Action(action)) => {
                        session.apply_action(action);
                    }
                    None => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }

        pump_events(&mut session, store, audio);
    }
}

/// Forward queued events to the audio sink and persist the result of a finished game.
fn pump_events(session: &mut GameSession, store: &HighScoreStore, audio: &mut dyn AudioSink) {
    audio.set_muted(session.paused());
    if session.events().is_empty() {
        return;
    }

    let events = session.drain_events();
    dispatch_cues(&events, audio);

    for event in &events {
        if let GameEvent::GameOver {
            final_score,
            new_record,
            ..
        } = event
        {
            if let Err(err) = store.record_game(*final_score, *new_record) {
                log::warn!("could not save high score: {err:#}");
            }
        }
    }
}
