use clap::Args;
use orbit_core::CategorySeries;

use super::{open_store, print_json};

#[derive(Args)]
pub struct ChartArgs {
    /// Category to chart
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    category: Option<String>,
    /// Chart every category
    #[arg(long)]
    all: bool,
}

pub fn run(args: ChartArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, store) = open_store()?;

    match args.category {
        Some(category) => {
            if !store.categories().contains(&category.as_str()) {
                return Err(format!("Unknown category: {category}").into());
            }
            let series = store.series_for(&category);
            print_json(&CategorySeries {
                chartable: series.is_chartable(),
                category,
                series,
            })
        }
        None if args.all => print_json(&store.all_series()),
        None => Err("pass a category or --all".into()),
    }
}

pub fn categories() -> Result<(), Box<dyn std::error::Error>> {
    let (_, store) = open_store()?;
    print_json(&store.categories())
}
