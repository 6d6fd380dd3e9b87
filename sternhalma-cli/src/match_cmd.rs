//! Match command - automated games between search players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sternhalma_core::{BoardListener, Color, Coord, EngineConfig, GameEngine, Player, Snapshot};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of players (2, 3, 4 or 6)
    #[arg(long, default_value = "2")]
    pub players: usize,

    /// Search depth in plies (overrides the config file)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Maximum plies per game before it is abandoned
    #[arg(long, default_value = "400")]
    pub max_plies: usize,

    /// Random plies played before the search takes over
    #[arg(long, default_value = "0")]
    pub opening_plies: usize,

    /// Engine config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start every game from this snapshot instead of a fresh board
    #[arg(long, value_name = "FILE")]
    pub resume: Option<PathBuf>,

    /// Save the final position of the last game here
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    plies: usize,
    /// Colors in finishing order
    finished: Vec<Color>,
    /// Colors still racing when the game stopped
    remaining: Vec<Color>,
    completed: bool,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    completed: usize,
    abandoned: usize,
    avg_plies: f32,
}

/// Records what the engine reports during a game
#[derive(Default)]
struct GameLog {
    plies: usize,
    finished: Vec<Color>,
}

impl BoardListener for GameLog {
    fn on_new_game(&mut self, roster: &[Player]) {
        let colors: Vec<&str> = roster.iter().map(|p| p.color.name()).collect();
        tracing::debug!("Seated: {}", colors.join(", "));
    }

    fn on_move_piece(&mut self, start: Coord, end: Coord) {
        self.plies += 1;
        tracing::trace!("ply {}: {} -> {}", self.plies, start, end);
    }

    fn on_player_eliminated(&mut self, player: &Player) {
        self.finished.push(player.color);
        tracing::info!(
            "{} reached the opposite nest after {} plies",
            player.color,
            self.plies
        );
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Load engine config and optional starting snapshot
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args)?;
    let start = args.resume.as_deref().map(Snapshot::load).transpose()?;

    tracing::info!(
        "Starting match: {} players, {} games, depth={}",
        start.as_ref().map_or(args.players, |s| s.player_count),
        args.games,
        config.difficulty
    );

    let (results, last) = play_match(&config, start.as_ref(), &args, seed)?;

    if let (Some(path), Some(snapshot)) = (&args.save, last) {
        snapshot.save(path)?;
        tracing::info!("Saved final position to {}", path.display());
    }

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Engine config from file or defaults, with every seat automated
fn load_config(args: &MatchArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    if !config.human_seats.is_empty() {
        tracing::warn!(
            "No interactive input here, automating human seats {:?}",
            config.human_seats
        );
        config = config.with_human_seats(Vec::new());
    }
    if let Some(depth) = args.depth {
        config = config.with_difficulty(depth);
    }

    Ok(config)
}

/// Play all games in the match. Returns the final snapshot of the last game.
fn play_match(
    config: &EngineConfig,
    start: Option<&Snapshot>,
    args: &MatchArgs,
    seed: Option<u64>,
) -> Result<(MatchResults, Option<Snapshot>)> {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);
    let mut last = None;

    for game_num in 0..args.games {
        let (record, snapshot) = play_single_game(config, start, game_num + 1, args, &mut rng)?;

        tracing::info!(
            "Game {}: {} plies, finished {:?}",
            record.game_number,
            record.plies,
            record.finished
        );

        games.push(record);
        last = Some(snapshot);
    }

    Ok((compute_match_statistics(games), last))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to completion or to the ply limit
fn play_single_game(
    config: &EngineConfig,
    start: Option<&Snapshot>,
    game_number: usize,
    args: &MatchArgs,
    rng: &mut ChaCha8Rng,
) -> Result<(GameRecord, Snapshot)> {
    let mut engine = GameEngine::new(config.clone());
    match start {
        Some(snapshot) => engine
            .import_snapshot(snapshot)
            .context("Failed to import starting snapshot")?,
        None => engine.start_game(args.players)?,
    }

    let mut log = GameLog::default();
    engine.dispatch_events(&mut log);

    let mut plies = 0;
    while !engine.is_game_over() && plies < args.max_plies {
        let Some(player) = engine.current_player().copied() else {
            break;
        };
        if plies < args.opening_plies {
            if engine.random_move(rng).is_none() {
                // Nothing to play at random; let the search pass the turn
                engine.auto_move(player.color);
            }
        } else {
            engine.auto_move(player.color);
        }
        engine.dispatch_events(&mut log);
        plies += 1;
    }

    let record = GameRecord {
        game_number,
        plies: log.plies,
        finished: log.finished,
        remaining: engine.roster().iter().map(|p| p.color).collect(),
        completed: engine.is_game_over(),
    };

    Ok((record, engine.export_snapshot()))
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let completed = games.iter().filter(|g| g.completed).count();
    let abandoned = games.len() - completed;

    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        games,
        completed,
        abandoned,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn color_names(colors: &[Color]) -> Vec<String> {
    colors.iter().map(|c| c.name().to_string()).collect()
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        plies: usize,
        finished: Vec<String>,
        remaining: Vec<String>,
        completed: bool,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        completed: usize,
        abandoned: usize,
        avg_plies: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        completed: results.completed,
        abandoned: results.abandoned,
        avg_plies: results.avg_plies,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                plies: g.plies,
                finished: color_names(&g.finished),
                remaining: color_names(&g.remaining),
                completed: g.completed,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    println!("\n=== Match Results ===");
    println!("Total games: {}", results.games.len());
    println!("Completed:   {}", results.completed);
    println!("Abandoned:   {}", results.abandoned);
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        let finished = color_names(&game.finished).join(" > ");
        println!(
            "  Game {}: {} plies, finished [{}], still racing {:?}",
            game.game_number,
            game.plies,
            finished,
            color_names(&game.remaining)
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
