//! Habit management commands for CLI.

use clap::Subcommand;
use orbit_core::{Clock, Config, Frequency, HabitPatch, Mode, NewHabit};
use serde_json::json;

use super::{open_store, print_json};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// Category the habit is charted under
        #[arg(long)]
        category: String,
        /// daily, 2x_week, 3x_week, weekly or monthly (default: daily)
        #[arg(long, default_value = "daily")]
        frequency: Frequency,
        /// flexible or strict (default: flexible)
        #[arg(long, default_value = "flexible")]
        mode: Mode,
    },
    /// List habits with today's status
    List {
        /// Only habits in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one habit with today's status
    Show {
        /// Habit ID
        id: String,
    },
    /// Edit habit metadata
    Edit {
        /// Habit ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        frequency: Option<Frequency>,
        #[arg(long)]
        mode: Option<Mode>,
    },
    /// Delete a habit permanently
    Delete {
        /// Habit ID
        id: String,
    },
    /// Check a habit in for today
    Done {
        /// Habit ID
        id: String,
    },
    /// Recompute points as streak x points-per-check-in, discarding penalties
    Repair {
        /// Habit ID
        id: String,
        /// Confirm that penalty history is discarded
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: HabitAction, clock: &impl Clock) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let policy = config.policy();
    let (file, mut store) = open_store()?;
    let today = clock.today();

    match action {
        HabitAction::Add {
            name,
            category,
            frequency,
            mode,
        } => {
            let habit = store
                .add(NewHabit::new(name, category).frequency(frequency).mode(mode))?
                .clone();
            file.save(&store)?;
            eprintln!("Habit created: {}", habit.id);
            print_json(&habit)?;
        }
        HabitAction::List { category } => {
            let rows: Vec<_> = store
                .habits()
                .iter()
                .filter(|h| category.as_deref().map_or(true, |c| h.category == c))
                .map(|h| {
                    json!({
                        "habit": h,
                        "status": orbit_core::progress::status(h, today, policy),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
        HabitAction::Show { id } => {
            let habit = store.get(&id).ok_or(format!("Habit not found: {id}"))?;
            print_json(&json!({
                "habit": habit,
                "status": orbit_core::progress::status(habit, today, policy),
            }))?;
        }
        HabitAction::Edit {
            id,
            name,
            category,
            frequency,
            mode,
        } => {
            let patch = HabitPatch {
                name,
                category,
                frequency,
                mode,
            };
            if patch.is_empty() {
                return Err("nothing to edit: pass at least one of --name, --category, --frequency, --mode".into());
            }
            let habit = store.update(&id, patch)?.clone();
            file.save(&store)?;
            eprintln!("Habit updated: {id}");
            print_json(&habit)?;
        }
        HabitAction::Delete { id } => {
            let removed = store.delete(&id)?;
            file.save(&store)?;
            eprintln!("Habit deleted: {}", removed.id);
            print_json(&removed)?;
        }
        HabitAction::Done { id } => {
            let outcome = store.check_in(&id, today, policy)?;
            if outcome.is_recorded() {
                file.save(&store)?;
            }
            print_json(&json!({
                "outcome": outcome,
                "habit": store.get(&id),
                "rank": store.rank(&config.rank_table()?),
            }))?;
        }
        HabitAction::Repair { id, yes } => {
            let summary = store.recompute_points(&id, yes, policy)?;
            file.save(&store)?;
            print_json(&summary)?;
        }
    }
    Ok(())
}
