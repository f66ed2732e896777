//! Penalty estimation: what a late check-in would cost, without mutating
//! anything.

use clap::Subcommand;
use orbit_core::progress::{estimate, status};
use orbit_core::{Clock, Config, Mode};

use super::{open_store, print_json};

#[derive(Subcommand)]
pub enum PenaltyAction {
    /// Estimate the points lost for a hypothetical streak
    Estimate {
        /// Streak at stake
        #[arg(long)]
        streak: u32,
        /// flexible or strict
        #[arg(long, default_value = "flexible")]
        mode: Mode,
        /// Days past the cadence window (grace period already applied)
        #[arg(long)]
        missed_days: u32,
    },
    /// Show what checking a habit in today would cost
    Preview {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: PenaltyAction, clock: &impl Clock) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        PenaltyAction::Estimate {
            streak,
            mode,
            missed_days,
        } => print_json(&estimate(config.policy(), streak, mode, missed_days)),
        PenaltyAction::Preview { id } => {
            let (_, store) = open_store()?;
            let habit = store.get(&id).ok_or(format!("Habit not found: {id}"))?;
            print_json(&status(habit, clock.today(), config.policy()))
        }
    }
}
