use orbit_core::Config;

use super::{open_store, print_json};

pub fn run(ladder: bool) -> Result<(), Box<dyn std::error::Error>> {
    let table = Config::load()?.rank_table()?;
    if ladder {
        return print_json(&table.tiers());
    }
    let (_, store) = open_store()?;
    print_json(&store.rank(&table))
}
