use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "orbit-cli", version, about = "Orbit habit tracker CLI")]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today instead of the local date
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management and check-ins
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Current rank from total points
    Rank {
        /// Print the configured tier ladder instead
        #[arg(long)]
        ladder: bool,
    },
    /// Distinct categories in first-appearance order
    Categories,
    /// Streak progress series per category
    Chart(commands::chart::ChartArgs),
    /// Penalty estimation
    Penalty {
        #[command(subcommand)]
        action: commands::penalty::PenaltyAction,
    },
    /// Export and import habit documents
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("ORBIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let clock = commands::clock(cli.today);
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action, &clock),
        Commands::Rank { ladder } => commands::rank::run(ladder),
        Commands::Categories => commands::chart::categories(),
        Commands::Chart(args) => commands::chart::run(args),
        Commands::Penalty { action } => commands::penalty::run(action, &clock),
        Commands::Data { action } => commands::data::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
