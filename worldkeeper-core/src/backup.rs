use crate::{copy_recursive, CoreError, Profile};
use chrono::{DateTime, Datelike, Local, Timelike};
use std::fs;
use std::path::{Path, PathBuf};

/// Folder created directly under the output directory. Kept verbatim from
/// the legacy tool so existing backup trees stay usable.
pub const BACKUP_ROOT: &str = "MBM_BACKUPS";

/// Suffix of the per-item container directory under [`BACKUP_ROOT`].
pub const ITEM_DIR_SUFFIX: &str = "_BACKUPS";

/// How months are numbered in backup folder names.
///
/// The legacy tool wrote the raw `Calendar.MONTH` value, so January showed
/// up as 0. Existing backup trees sort by those names; the choice is
/// therefore explicit rather than silently corrected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MonthNumbering {
    /// January is 1.
    #[default]
    OneBased,
    /// January is 0, matching folder names the legacy tool produced.
    ZeroBased,
}

/// `YEAR-MONTH-DAY--HOUR-MINUTE-SECOND--<itemName>`, components numeric and
/// unpadded.
pub fn backup_folder_name(
    now: DateTime<Local>,
    item_name: &str,
    months: MonthNumbering,
) -> String {
    let month = match months {
        MonthNumbering::OneBased => now.month(),
        MonthNumbering::ZeroBased => now.month0(),
    };
    format!(
        "{}-{}-{}--{}-{}-{}--{}",
        now.year(),
        month,
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        item_name
    )
}

/// Display string recorded on an item after a successful backup,
/// e.g. "January 5, 2025 at 13.4.2".
pub fn last_backup_description(now: DateTime<Local>) -> String {
    format!(
        "{} {}, {} at {}.{}.{}",
        now.format("%B"),
        now.day(),
        now.year(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Container directory holding all backups of one item.
pub fn item_backup_dir(output_dir: &Path, item_name: &str) -> PathBuf {
    output_dir
        .join(BACKUP_ROOT)
        .join(format!("{item_name}{ITEM_DIR_SUFFIX}"))
}

/// Back up a tracked item now. Returns the path of the new backup folder.
pub fn run_backup(
    profile: &mut Profile,
    item_name: &str,
    months: MonthNumbering,
) -> Result<PathBuf, CoreError> {
    run_backup_at(profile, item_name, Local::now(), months)
}

/// [`run_backup`] with an injected wall-clock instant.
///
/// Creates the per-item container if absent, copies the item's source tree
/// into a freshly named folder, and on success records the backup time on
/// the item and marks the profile dirty. A failed copy removes the partial
/// folder before the error propagates.
pub fn run_backup_at(
    profile: &mut Profile,
    item_name: &str,
    now: DateTime<Local>,
    months: MonthNumbering,
) -> Result<PathBuf, CoreError> {
    if profile.is_new() {
        return Err(CoreError::Validation(
            "no usable output directory; set one before backing up".to_string(),
        ));
    }
    let output_dir = profile
        .output_dir()
        .ok_or_else(|| CoreError::Validation("no output directory configured".to_string()))?
        .to_path_buf();
    let source = profile
        .item(item_name)
        .ok_or_else(|| CoreError::NotFound(format!("no tracked item named '{item_name}'")))?
        .source_path
        .clone();

    let backup_path =
        item_backup_dir(&output_dir, item_name).join(backup_folder_name(now, item_name, months));
    fs::create_dir_all(&backup_path).map_err(|e| CoreError::Copy {
        from: source.clone(),
        to: backup_path.clone(),
        source: e,
    })?;

    if let Err(e) = copy_recursive(&source, &backup_path) {
        let _ = fs::remove_dir_all(&backup_path);
        return Err(e);
    }

    let item = profile.item_mut(item_name).expect("item resolved above");
    item.last_backup = last_backup_description(now);
    profile.mark_dirty();
    Ok(backup_path)
}

/// Names of existing backup folders for an item, sorted. Empty when the item
/// has never been backed up. Hidden entries are skipped.
pub fn list_backups(profile: &Profile, item_name: &str) -> Result<Vec<String>, CoreError> {
    profile
        .item(item_name)
        .ok_or_else(|| CoreError::NotFound(format!("no tracked item named '{item_name}'")))?;
    let output_dir = profile
        .output_dir()
        .ok_or_else(|| CoreError::Validation("no output directory configured".to_string()))?;

    let container = item_backup_dir(output_dir, item_name);
    if !container.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(&container).map_err(|e| {
        CoreError::NotFound(format!(
            "cannot read backup folder {}: {e}",
            container.display()
        ))
    })?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            CoreError::NotFound(format!(
                "cannot read backup folder {}: {e}",
                container.display()
            ))
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with('.') && entry.path().is_dir() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Copy the named backup folder into `dest_saves_dir/<backup_folder>`.
/// Refuses to overwrite an existing save.
pub fn restore(
    profile: &Profile,
    item_name: &str,
    backup_folder: &str,
    dest_saves_dir: &Path,
) -> Result<PathBuf, CoreError> {
    let output_dir = profile
        .output_dir()
        .ok_or_else(|| CoreError::Validation("no output directory configured".to_string()))?;
    profile
        .item(item_name)
        .ok_or_else(|| CoreError::NotFound(format!("no tracked item named '{item_name}'")))?;

    let backup_src = item_backup_dir(output_dir, item_name).join(backup_folder);
    if !backup_src.is_dir() {
        return Err(CoreError::NotFound(format!(
            "no backup folder '{backup_folder}' for '{item_name}'"
        )));
    }
    if !dest_saves_dir.is_dir() {
        return Err(CoreError::Validation(format!(
            "destination {} is not a directory",
            dest_saves_dir.display()
        )));
    }
    let target = dest_saves_dir.join(backup_folder);
    if target.exists() {
        return Err(CoreError::Validation(format!(
            "{} already exists; refusing to overwrite",
            target.display()
        )));
    }
    copy_recursive(&backup_src, &target)?;
    Ok(target)
}
