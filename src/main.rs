use checkers::build_info;
use checkers::checkers::{CheckersGame, CheckersInput, Difficulty};
use checkers::config::{CheckersConfig, CliCommand, ConfigStore};
use checkers::input::{map_key, KeyAction};
use checkers::logging;
use checkers::ui::render_checkers_scene;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};

fn main() {
    if let Err(e) = run() {
        eprintln!("checkers: {}", e);
        std::process::exit(1);
    }
}

fn run() -> checkers::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let store = ConfigStore::new()?;
    let mut config = store.load()?;
    match config.apply_args(&args)? {
        CliCommand::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        CliCommand::Help => {
            print_help();
            return Ok(());
        }
        CliCommand::Play => {}
    }
    config.validate()?;

    let log_path = logging::init(&config)?;
    tracing::info!(
        log = %log_path.display(),
        difficulty = config.difficulty.name(),
        seed = ?config.seed,
        "Starting checkers"
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = CheckersGame::new(config.difficulty);
    game.ai_think_target = config.ai_think_ticks;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = game_loop(&mut terminal, &mut game, &mut rng, &mut config, &store);

    // Cleanup terminal, even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(moves = game.total_moves(), "Exiting");
    result
}

/// Draw, handle keys, and advance the AI once per tick until the player quits.
fn game_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    game: &mut CheckersGame,
    rng: &mut StdRng,
    config: &mut CheckersConfig,
    store: &ConfigStore,
) -> checkers::Result<()> {
    let tick_rate = Duration::from_millis(config.tick_ms);
    let mut last_tick = Instant::now();
    let mut tick_count: u64 = 0;

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            render_checkers_scene(frame, area, game, tick_count);
        })?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Game(input) => {
                        if let CheckersInput::SetDifficulty(difficulty) = input {
                            remember_difficulty(config, store, difficulty);
                        }
                        game.process_input(input);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            game.process_ai_thinking(rng);
            tick_count += 1;
            last_tick = Instant::now();
        }
    }
}

/// Persist a difficulty change so the next session starts with it.
fn remember_difficulty(config: &mut CheckersConfig, store: &ConfigStore, difficulty: Difficulty) {
    if config.difficulty == difficulty {
        return;
    }
    config.difficulty = difficulty;
    if let Err(e) = store.save_difficulty(difficulty) {
        tracing::warn!(error = %e, path = %store.path().display(), "Could not save difficulty");
    }
}

fn print_help() {
    println!("Checkers - play against the computer\n");
    println!("Usage: checkers [options]\n");
    println!("Options:");
    println!("  --difficulty=<easy|normal|hard>  AI strength (default: normal)");
    println!("  --seed=<n>                       Seed the AI for reproducible games");
    println!("  --version                        Show version information");
    println!("  --help                           Show this help message\n");
    println!("Keys:");
    println!("  Arrows  move cursor    Enter  select / move");
    println!("  n       new game       1-3    set difficulty");
    println!("  q, Esc  quit");
}
