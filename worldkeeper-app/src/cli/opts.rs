use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "worldkeeper",
    version,
    about = "Timestamped backups for world save folders"
)]
pub struct Cli {
    /// Profile file (defaults to the per-user data dir)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Number backup-folder months from 0 like the legacy tool (January = 0)
    #[arg(long)]
    pub legacy_month_numbers: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Track a world save folder
    Add(AddArgs),
    /// Stop tracking a world (backup files are kept)
    Rm { name: String },
    /// List tracked worlds
    List,
    /// Set the directory backups are written under
    SetOutput { path: PathBuf },
    /// Back up a tracked world now
    Backup { name: String },
    /// List existing backups of a world
    Backups { name: String },
    /// Copy a backup into a saves directory
    Restore {
        name: String,
        backup: String,
        dest: PathBuf,
    },
    /// Write the profile as JSON
    Export { path: PathBuf },
    /// Merge items from a JSON export
    Import { path: PathBuf },
}

#[derive(Debug, Args, Clone)]
pub struct AddArgs {
    pub path: PathBuf,
    /// Display name (defaults to the folder name)
    #[arg(long)]
    pub name: Option<String>,
}
