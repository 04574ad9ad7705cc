use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use focusmate_core::Config;

mod commands;
mod render;
mod session;

#[derive(Parser)]
#[command(name = "focusmate-cli", version, about = "Focus Mate CLI")]
struct Cli {
    /// Evaluate due dates as of this day (YYYY-MM-DD) instead of today
    #[arg(long, global = true, value_parser = parse_day)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Show the ranked bucket and the someday list
    Bucket(commands::bucket::BucketArgs),
    /// Pick the one task to work on now
    Focus(commands::focus::FocusArgs),
    /// Project overview
    Project {
        #[command(subcommand)]
        action: commands::project::ProjectAction,
    },
    /// Agenda (dated appointments)
    Agenda {
        #[command(subcommand)]
        action: commands::agenda::AgendaAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    focusmate_core::normalize::parse_iso_date(raw)
        .ok_or_else(|| format!("expected YYYY-MM-DD, got '{raw}'"))
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&Config::load_or_default().log.level);

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action, today),
        Commands::Bucket(args) => commands::bucket::run(args, today),
        Commands::Focus(args) => commands::focus::run(args, today),
        Commands::Project { action } => commands::project::run(action, today),
        Commands::Agenda { action } => commands::agenda::run(action, today),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "focusmate-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
