use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder last-backup description for items never backed up.
pub const NEVER_BACKED_UP: &str = "Never";

/// Marker file every Minecraft world save carries at its root.
pub const WORLD_MARKER: &str = "level.dat";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackedItem {
    pub name: String,
    pub source_path: PathBuf,
    pub last_backup: String,
}

impl TrackedItem {
    pub fn new(source_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            last_backup: NEVER_BACKED_UP.to_string(),
        }
    }
}

/// The set of tracked world saves plus the directory backups go under.
///
/// Item order is insertion order and item names are unique (case-sensitive).
/// `is_new` means the caller must resolve an output directory before any
/// backup can run: either nothing was ever persisted, or the persisted
/// output directory no longer exists on disk.
#[derive(Clone, Debug)]
pub struct Profile {
    output_dir: Option<PathBuf>,
    items: Vec<TrackedItem>,
    is_new: bool,
    dirty: bool,
}

impl Profile {
    pub fn new_empty() -> Self {
        Self {
            output_dir: None,
            items: Vec::new(),
            is_new: true,
            dirty: false,
        }
    }

    /// Rebuild a profile from persisted state. A recorded output directory
    /// that no longer exists flags the profile new again, forcing the caller
    /// to re-resolve it. Duplicate item names (possible in a hand-edited
    /// file) keep the first occurrence; later ones are dropped.
    pub fn loaded(output_dir: Option<PathBuf>, items: Vec<TrackedItem>) -> Self {
        let usable = output_dir.as_deref().is_some_and(Path::is_dir);
        let mut unique: Vec<TrackedItem> = Vec::with_capacity(items.len());
        for item in items {
            if unique.iter().all(|it| it.name != item.name) {
                unique.push(item);
            }
        }
        Self {
            output_dir,
            items: unique,
            is_new: !usable,
            dirty: false,
        }
    }

    /// Register a world save. The source must be a directory containing the
    /// world marker file, and the name must not already be tracked.
    pub fn add_item(
        &mut self,
        source_path: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> Result<&TrackedItem, CoreError> {
        let source_path = source_path.into();
        validate_world_dir(&source_path)?;
        self.push_item(TrackedItem::new(source_path, name))
    }

    /// Insert an item without checking the source on disk (used when merging
    /// an export whose sources may have moved). Name and field rules still
    /// apply: the profile file is colon-delimited, so no item field may
    /// contain ':' — accepting one would corrupt the file on the next save.
    pub fn push_item(&mut self, item: TrackedItem) -> Result<&TrackedItem, CoreError> {
        if item.name.contains(':') {
            return Err(CoreError::Validation(
                "item names may not contain ':'".to_string(),
            ));
        }
        if item.source_path.to_string_lossy().contains(':') {
            return Err(CoreError::Validation(format!(
                "source path {} contains ':', which the profile file cannot represent",
                item.source_path.display()
            )));
        }
        if item.last_backup.contains(':') {
            return Err(CoreError::Validation(
                "last-backup descriptions may not contain ':'".to_string(),
            ));
        }
        if self.items.iter().any(|it| it.name == item.name) {
            return Err(CoreError::Validation(format!(
                "an item named '{}' is already tracked",
                item.name
            )));
        }
        self.items.push(item);
        self.dirty = true;
        Ok(self.items.last().expect("just pushed"))
    }

    /// Stop tracking an item. Backup files on disk are untouched.
    pub fn remove_item(&mut self, name: &str) -> Result<TrackedItem, CoreError> {
        let idx = self
            .items
            .iter()
            .position(|it| it.name == name)
            .ok_or_else(|| CoreError::NotFound(format!("no tracked item named '{name}'")))?;
        self.dirty = true;
        Ok(self.items.remove(idx))
    }

    pub fn item(&self, name: &str) -> Option<&TrackedItem> {
        self.items.iter().find(|it| it.name == name)
    }

    pub fn item_mut(&mut self, name: &str) -> Option<&mut TrackedItem> {
        self.items.iter_mut().find(|it| it.name == name)
    }

    pub fn items(&self) -> &[TrackedItem] {
        &self.items
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), CoreError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CoreError::Validation(format!(
                "output directory {} does not exist",
                dir.display()
            )));
        }
        self.output_dir = Some(dir);
        self.is_new = false;
        self.dirty = true;
        Ok(())
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// A directory qualifies as a world save when the marker file sits at its
/// root. Rejecting anything else keeps stray folders out of the profile.
pub fn validate_world_dir(path: &Path) -> Result<(), CoreError> {
    if !path.is_dir() {
        return Err(CoreError::Validation(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    if !path.join(WORLD_MARKER).exists() {
        return Err(CoreError::Validation(format!(
            "{} has no {WORLD_MARKER}; not a world save",
            path.display()
        )));
    }
    Ok(())
}
