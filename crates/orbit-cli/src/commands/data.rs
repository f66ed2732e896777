//! Portable export/import of the whole habit collection.

use std::path::PathBuf;

use clap::Subcommand;
use orbit_core::storage::snapshot::{export_to, import_from};

use super::open_store;

#[derive(Subcommand)]
pub enum DataAction {
    /// Write all habits to a JSON document
    Export {
        /// Destination file
        path: PathBuf,
    },
    /// Replace all habits with the contents of a JSON document
    Import {
        /// Source file
        path: PathBuf,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let (file, store) = open_store()?;

    match action {
        DataAction::Export { path } => {
            export_to(&store, &path)?;
            println!("exported {} habits to {}", store.len(), path.display());
        }
        DataAction::Import { path } => {
            let imported = import_from(&path)?;
            file.save(&imported)?;
            println!("imported {} habits from {}", imported.len(), path.display());
        }
    }
    Ok(())
}
