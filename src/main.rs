use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ace2king::config::AppConfig;
use ace2king::game::GameSession;
use ace2king::persist::{GameRecord, GameStore};
use ace2king::ui::App;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};

/// Keep score for a game of Ace to King.
#[derive(Parser)]
#[command(name = "ace2king", about = "Terminal scoreboard for Ace to King")]
struct Cli {
    /// Player names, in seating order
    players: Vec<String>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "ace2king.toml")]
    config: PathBuf,

    /// Shuffle the seating order before the first round
    #[arg(long)]
    shuffle: bool,

    /// Shuffle with this seed, for a repeatable order (implies --shuffle)
    #[arg(long)]
    seed: Option<u64>,

    /// Do not save the finished game
    #[arg(long)]
    no_save: bool,

    /// Log score entries as well as round changes
    #[arg(long)]
    verbose: bool,

    /// Print a saved game and exit
    #[arg(long, value_name = "FILE")]
    review: Option<PathBuf>,

    /// List saved games and exit
    #[arg(long)]
    list: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    apply_overrides(&cli, &mut config);

    if let Some(path) = &cli.review {
        let record = GameStore::load(path)?;
        print_record(&record);
        return Ok(());
    }
    if cli.list {
        for path in GameStore::new(&config.persistence).list()? {
            println!("{}", path.display());
        }
        return Ok(());
    }

    init_logging(&config.persistence.log_file, cli.verbose);

    let mut session = GameSession::new(
        &cli.players,
        config.scoring.win_rule,
        config.input.max_digits,
    );
    if config.players.shuffle {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        session.shuffle_seats(&mut rng);
    }
    tracing::info!(
        players = ?session.players().iter().map(|p| p.name()).collect::<Vec<_>>(),
        win_rule = ?config.scoring.win_rule,
        "starting game"
    );

    let store = config
        .persistence
        .enabled
        .then(|| GameStore::new(&config.persistence));
    let mut app = App::new(session, store);

    run_terminal(&mut app).context("running terminal UI")
}

/// Command-line flags win over the config file.
fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if cli.shuffle || cli.seed.is_some() {
        config.players.shuffle = true;
    }
    if cli.no_save {
        config.persistence.enabled = false;
    }
}

fn run_terminal(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

/// Send logs to a file; stdout belongs to the TUI. Runs without logging if
/// the file cannot be opened.
fn init_logging(path: &Path, verbose: bool) {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot open log file '{}': {err}", path.display());
            return;
        }
    };
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init();
}

fn print_record(record: &GameRecord) {
    println!(
        "Round {} ({}), {:?}, win rule {:?}",
        record.round + 1,
        record.card,
        record.phase,
        record.win_rule
    );
    for player in &record.players {
        let scores: Vec<String> = player
            .scores_in_play_order()
            .into_iter()
            .map(|(card, score)| format!("{card}:{score}"))
            .collect();
        println!(
            "{:<12} total {:>4}  wins {:>2}  {}",
            player.name,
            player.total,
            player.wins,
            scores.join(" ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overridden(args: &[&str]) -> AppConfig {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut config = AppConfig::default();
        apply_overrides(&cli, &mut config);
        config
    }

    #[test]
    fn test_seed_implies_shuffle() {
        assert!(overridden(&["ace2king", "--seed", "7", "alice", "bob"]).players.shuffle);
        assert!(overridden(&["ace2king", "--shuffle", "alice"]).players.shuffle);
        assert!(!overridden(&["ace2king", "alice"]).players.shuffle);
    }

    #[test]
    fn test_no_save_disables_persistence() {
        assert!(!overridden(&["ace2king", "--no-save"]).persistence.enabled);
        assert!(overridden(&["ace2king"]).persistence.enabled);
    }

    #[test]
    fn test_player_names_are_positional() {
        let cli = Cli::try_parse_from(["ace2king", "alice", "bob"]).unwrap();
        assert_eq!(cli.players, vec!["alice", "bob"]);
    }
}
