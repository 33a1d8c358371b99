use crate::cli::opts::*;

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use worldkeeper_core::{
    backup::{list_backups, restore, run_backup, MonthNumbering, BACKUP_ROOT},
    Profile, TrackedItem,
};
use worldkeeper_store::ProfileStore;

pub fn run_cli(args: Cli) -> Result<()> {
    let store = match &args.profile {
        Some(path) => ProfileStore::new(path.clone()),
        None => ProfileStore::open_default(),
    };
    let mut profile = store.load();
    let months = if args.legacy_month_numbers {
        MonthNumbering::ZeroBased
    } else {
        MonthNumbering::OneBased
    };

    match args.cmd {
        Command::Add(a) => add_cmd(&mut profile, a)?,
        Command::Rm { name } => {
            profile.remove_item(&name)?;
            println!("stopped tracking '{name}' (backup files were kept)");
        }
        Command::List => list_cmd(&profile),
        Command::SetOutput { path } => {
            profile.set_output_dir(path.clone())?;
            fs::create_dir_all(path.join(BACKUP_ROOT))
                .with_context(|| format!("cannot create {BACKUP_ROOT} under {}", path.display()))?;
            println!("backups will be written under {}", path.display());
        }
        Command::Backup { name } => {
            let dest = run_backup(&mut profile, &name, months)?;
            println!("backed up '{name}' to {}", dest.display());
        }
        Command::Backups { name } => {
            let backups = list_backups(&profile, &name)?;
            if backups.is_empty() {
                println!("no backups of '{name}' yet");
            }
            for b in backups {
                println!("{b}");
            }
        }
        Command::Restore { name, backup, dest } => {
            let target = restore(&profile, &name, &backup, &dest)?;
            println!("restored to {}", target.display());
        }
        Command::Export { path } => export_cmd(&profile, &path)?,
        Command::Import { path } => import_cmd(&mut profile, &path)?,
    }

    if profile.is_dirty() {
        store.save(&profile)?;
        profile.mark_clean();
    }
    Ok(())
}

fn add_cmd(profile: &mut Profile, a: AddArgs) -> Result<()> {
    let name = match a.name {
        Some(n) => n,
        None => a
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                anyhow!("cannot derive a name from {}; pass --name", a.path.display())
            })?,
    };
    let item = profile.add_item(a.path, name)?;
    println!("tracking '{}' ({})", item.name, item.source_path.display());
    Ok(())
}

fn list_cmd(profile: &Profile) {
    if profile.items().is_empty() {
        println!("no tracked worlds");
        return;
    }
    for item in profile.items() {
        println!(
            "{}\t{}\tlast backup: {}",
            item.name,
            item.source_path.display(),
            item.last_backup
        );
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct ExportBundle {
    version: u32,
    output_dir: Option<PathBuf>,
    items: Vec<TrackedItem>,
}

fn export_cmd(profile: &Profile, path: &Path) -> Result<()> {
    let bundle = ExportBundle {
        version: 1,
        output_dir: profile.output_dir().map(|p| p.to_path_buf()),
        items: profile.items().to_vec(),
    };
    let s = serde_json::to_string_pretty(&bundle)?;
    fs::write(path, s).with_context(|| format!("cannot write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn import_cmd(profile: &mut Profile, path: &Path) -> Result<()> {
    let data =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let bundle: ExportBundle = serde_json::from_str(&data)?;
    let mut added = 0usize;
    for item in bundle.items {
        match profile.push_item(item) {
            Ok(_) => added += 1,
            Err(e) => warn!("skipping item: {e}"),
        }
    }
    println!("imported {added} item(s)");
    Ok(())
}
