// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for playing, simulating and replaying games
// ═══════════════════════════════════════════════════════════════════════

use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use tranquillity_agents::AgentKind;
use tranquillity_engine::replay::replay;
use tranquillity_engine::types::Card;
use tranquillity_engine::GameConfig;
use tranquillity_tournament::{database::Database, run_game, run_series, GameMetrics, SeriesSummary};

#[derive(Parser)]
#[command(name = "tranquillity", about = "Tranquillity cooperative card game simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game and print every player's actions
    Play {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[command(flatten)]
        game: GameArgs,
    },
    /// Run a series of seeded games and summarise them
    Simulate {
        #[arg(short, long, default_value_t = 100)]
        games: u64,
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        #[command(flatten)]
        game: GameArgs,
        /// Print metrics for every game
        #[arg(long)]
        verbose: bool,
        /// Decimal places for percentages in per-game metrics
        #[arg(long, default_value_t = 1)]
        percentage_digits: usize,
        /// Spread games over all cores
        #[arg(long)]
        parallel: bool,
        /// Store every finished game in this SQLite file
        #[arg(long)]
        db: Option<String>,
        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show per-agent stats from a database
    Stats {
        #[arg(short, long, default_value = "results.db")]
        db: String,
    },
    /// Rebuild the final board of a stored game from its history
    Replay {
        game_id: i64,
        #[arg(short, long, default_value = "results.db")]
        db: String,
    },
}

#[derive(Args)]
struct GameArgs {
    /// JSON config file; overrides the individual flags below
    #[arg(long)]
    config: Option<String>,
    #[arg(long, default_value_t = 4)]
    players: usize,
    #[arg(long, default_value_t = 36)]
    board_size: usize,
    #[arg(long, default_value_t = 5)]
    hand_size: usize,
    #[arg(long, default_value_t = 80)]
    n_cards: Card,
    #[arg(long, default_value_t = 5)]
    n_finish: usize,
    #[arg(long, default_value_t = 2)]
    start_discard: usize,
    #[arg(long, default_value_t = 2)]
    pass_discard: usize,
    /// One agent for every seat, or one per player (comma separated)
    #[arg(short, long, value_delimiter = ',', default_value = "heuristic")]
    agents: Vec<AgentKind>,
}

impl GameArgs {
    fn config(&self) -> Result<GameConfig, String> {
        let config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {}", path, e))?;
                GameConfig::from_json(&json).map_err(|e| e.to_string())?
            }
            None => GameConfig {
                n_players: self.players,
                board_size: self.board_size,
                hand_size: self.hand_size,
                n_cards: self.n_cards,
                n_finish: self.n_finish,
                start_discard_size: self.start_discard,
                pass_discard_size: self.pass_discard,
            },
        };
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Play { seed, game } => cmd_play(seed, &game),
        Commands::Simulate { games, seed, game, verbose, percentage_digits, parallel, db, json } => {
            let output = Output { verbose, json, digits: percentage_digits };
            cmd_simulate(games, seed, &game, output, parallel, db.as_deref())
        }
        Commands::Stats { db } => cmd_stats(&db),
        Commands::Replay { game_id, db } => cmd_replay(game_id, &db),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_play(seed: u64, args: &GameArgs) -> Result<(), String> {
    let config = args.config()?;
    println!("=== Tranquillity ===\n");
    println!(
        "seed={}, players={}, board={}, cards={}, agents={:?}\n",
        seed, config.n_players, config.board_size, config.n_cards, args.agents
    );

    let result = run_game(&config, seed, &args.agents).map_err(|e| e.to_string())?;
    for pr in &result.player_results {
        let actions: Vec<String> = pr.actions.iter().map(|a| a.to_string()).collect();
        println!("Player {} ({}): {}", pr.id, pr.agent_name, actions.join(" "));
    }
    println!();
    println!("Final board: {}", result.board.render());
    println!("Outcome: {}", result.status);

    let metrics = GameMetrics::from_result(&result);
    println!(
        "Filled {}/{} ({:.1}%), {} turns, {} cards discarded",
        metrics.filled, config.board_size, metrics.filled_pct, metrics.turns, metrics.total_discards
    );
    Ok(())
}

struct Output {
    verbose: bool,
    json: bool,
    digits: usize,
}

/// Per-game block: headline numbers, action counts per player and the
/// share of each action type.
fn metrics_lines(m: &GameMetrics, board_size: usize, digits: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "  seed {:>6}: {:4} filled {:>3}/{} ({:.*}%) discards {:>3} turns {:>4} deck left {:>3}",
        m.seed, m.status.to_string(), m.filled, board_size, digits, m.filled_pct,
        m.total_discards, m.turns, m.remaining_deck
    )];
    for (id, counts) in m.action_counts.iter().enumerate() {
        let counts: Vec<String> = counts.iter().map(|(code, n)| format!("{}={}", code, n)).collect();
        lines.push(format!("    player {}: {} (discarded {})", id, counts.join(" "), m.discards_by_player[id]));
    }
    let shares: Vec<String> = m.action_pct.iter()
        .map(|(code, pct)| format!("{}={:.*}%", code, digits, pct))
        .collect();
    lines.push(format!("    actions: {}", shares.join(" ")));
    lines
}

fn cmd_simulate(
    games: u64,
    start_seed: u64,
    args: &GameArgs,
    output: Output,
    parallel: bool,
    db_path: Option<&str>,
) -> Result<(), String> {
    let config = args.config()?;
    if !output.json {
        println!("=== Simulation: {} games from seed {}, agents={:?} ===\n", games, start_seed, args.agents);
    }

    let db = db_path.map(Database::new).transpose().map_err(|e| e.to_string())?;
    let results = run_series(&config, start_seed, games, &args.agents, parallel).map_err(|e| e.to_string())?;

    let mut metrics = Vec::with_capacity(results.len());
    let mut failed = 0;
    for result in &results {
        match result {
            Ok(result) => {
                let m = GameMetrics::from_result(result);
                if output.verbose && !output.json {
                    for line in metrics_lines(&m, config.board_size, output.digits) {
                        println!("{}", line);
                    }
                }
                if let Some(db) = &db {
                    let id = db.store_game(result, &m).map_err(|e| e.to_string())?;
                    log::debug!("stored seed {} as game {}", result.seed, id);
                }
                metrics.push(m);
            }
            Err(e) => {
                failed += 1;
                eprintln!("  {}", e);
            }
        }
    }

    let summary = SeriesSummary::from_metrics(&metrics, failed);
    if output.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{}", json);
        return Ok(());
    }
    println!("\n--- Summary ({} games, {} errors) ---", summary.games, summary.failed);
    println!("  Wins:            {:>6} ({:.1}%)", summary.wins, summary.win_rate);
    println!("  Losses:          {:>6}", summary.losses);
    println!("  Total turns:     {:>6} (avg {:.1})", summary.total_turns, summary.avg_turns);
    println!("  Total discards:  {:>6} (avg {:.1})", summary.total_discards, summary.avg_discards);
    println!("  Avg filled:      {:>6.1} ({:.1}%)", summary.avg_filled, summary.avg_filled_pct);
    println!("  Avg deck left:   {:>6.1}", summary.avg_remaining_deck);
    if let Some(best) = &summary.best {
        println!(
            "  Best game:       seed {} ({}, {} filled, {} discards)",
            best.seed, best.status, best.filled, best.total_discards
        );
    }
    if let (Some(db), Some(path)) = (&db, db_path) {
        println!("\nResults saved to: {}", path);
        println!("Total games in DB: {}", db.game_count().map_err(|e| e.to_string())?);
    }
    Ok(())
}

fn cmd_stats(db_path: &str) -> Result<(), String> {
    let db = Database::new(db_path).map_err(|e| e.to_string())?;
    let stats = db.agent_stats().map_err(|e| e.to_string())?;
    if stats.is_empty() {
        println!("No agents found. Run some simulations with --db first.");
        return Ok(());
    }
    println!("=== Agent stats ({} games) ===\n", db.game_count().map_err(|e| e.to_string())?);
    println!("{:<12} {:>8} {:>8} {:>8} {:>10}", "Agent", "Seats", "Wins", "Win %", "Discards");
    println!("{}", "-".repeat(50));
    for s in &stats {
        println!(
            "{:<12} {:>8} {:>8} {:>8.1} {:>10.1}",
            s.name, s.seats, s.wins, s.win_rate(), s.avg_discards()
        );
    }
    Ok(())
}

fn cmd_replay(game_id: i64, db_path: &str) -> Result<(), String> {
    let db = Database::new(db_path).map_err(|e| e.to_string())?;
    let game = db.load_game(game_id)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("no game with id {}", game_id))?;

    let board = replay(game.board_size, game.n_cards, &game.history).map_err(|e| e.to_string())?;
    println!("Game {} (seed {}, {}): {} turns", game.id, game.seed, game.lineup.join(","), game.history.len());
    println!("Final board: {}", board.render());
    println!("Outcome: {}", game.status);
    Ok(())
}
