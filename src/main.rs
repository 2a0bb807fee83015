use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pacman_engine::{Direction, Game, GameConfig, Layout};

mod render;

use render::Renderer;

const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_RENDER_FPS: u64 = 60;
const LOG_ENV: &str = "PACMAN_LOG";

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal Pac-Man", long_about = None)]
struct Args {
    // Milliseconds per simulation tick (overrides PACMAN_TICK_MS)
    #[arg(long)]
    tick_ms: Option<u64>,

    // Render frames per second (overrides PACMAN_FPS)
    #[arg(long)]
    fps: Option<u64>,

    // Seed for frightened ghost wandering
    #[arg(long)]
    seed: Option<u64>,

    // Maze file in the text layout format
    #[arg(long)]
    layout: Option<PathBuf>,

    #[arg(long)]
    lives: Option<u32>,

    // Write logs here; the terminal is busy drawing the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let layout = match &args.layout {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading layout {}", path.display()))?;
            Layout::parse(&text).with_context(|| format!("parsing layout {}", path.display()))?
        }
        None => Layout::classic(),
    };
    let mut config = GameConfig::default();
    if let Some(lives) = args.lives {
        config.starting_lives = lives;
    }
    let game = Game::new(&layout, config)?;

    let tick_ms = args
        .tick_ms
        .filter(|v| *v > 0)
        .unwrap_or_else(|| env_u64("PACMAN_TICK_MS", DEFAULT_TICK_MS));
    let render_fps = args
        .fps
        .filter(|v| *v > 0)
        .unwrap_or_else(|| env_u64("PACMAN_FPS", DEFAULT_RENDER_FPS));
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, tick_ms, render_fps, "starting");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, game, StdRng::seed_from_u64(seed), tick_ms, render_fps);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;
    Ok(())
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(
    stdout: &mut Stdout,
    mut game: Game,
    mut rng: StdRng,
    tick_ms: u64,
    render_fps: u64,
) -> io::Result<()> {
    let mut renderer = Renderer::new(game.maze());
    let tick_time = Duration::from_millis(tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    let mut last_tick = Instant::now();
    let mut paused = false;

    loop {
        let frame_start = Instant::now();
        let mut input = None;
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('p') => paused = !paused,
                        code => {
                            if let Some(dir) = direction_for(code) {
                                input = Some(dir);
                            }
                        }
                    }
                }
                Event::Resize(_, _) => renderer.invalidate(),
                _ => {}
            }
        }

        if paused {
            last_tick = Instant::now();
        } else if let Some(dir) = input {
            game.queue_direction(dir);
        }

        if !paused && last_tick.elapsed() >= tick_time {
            last_tick = Instant::now();
            game.tick(None, &mut rng);
            let snapshot = game.snapshot();
            renderer.render(stdout, game.maze(), &snapshot, paused)?;
            if snapshot.game_over {
                info!(score = snapshot.score, level = snapshot.level, "game over");
                renderer.show_final_score(stdout, &snapshot)?;
                return wait_for_quit();
            }
        } else {
            renderer.render(stdout, game.maze(), &game.snapshot(), paused)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('k') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('j') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('h') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('l') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Positive integer from the environment, or `default` when unset or unusable.
fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name).map(|raw| raw.trim().parse::<u64>()) {
        Ok(Ok(value)) if value > 0 => value,
        _ => default,
    }
}

fn wait_for_quit() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_u64_falls_back_on_missing_zero_or_junk() {
        let name = "PACMAN_ENV_U64_TEST";
        std::env::remove_var(name);
        assert_eq!(env_u64(name, 7), 7);
        std::env::set_var(name, " 25 ");
        assert_eq!(env_u64(name, 7), 25);
        std::env::set_var(name, "0");
        assert_eq!(env_u64(name, 7), 7);
        std::env::set_var(name, "fast");
        assert_eq!(env_u64(name, 7), 7);
        std::env::remove_var(name);
    }
}
