use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;
use worldkeeper_core::{CoreError, Profile, TrackedItem};

pub mod paths;

const OUT_DIR_TAG: &str = "outDir";
const WORLD_TAG: &str = "MBMWORLD";

// tag : original dir name : item name : source path : last backup
const WORLD_FIELDS: usize = 5;

/// Loads and saves a [`Profile`] as the legacy flat text format:
///
/// ```text
/// version:<semver>
/// numworlds:<integer>
/// lastclosed:<free-text timestamp>
/// outDir:<path>
/// MBMWORLD:<originalDirName>:<itemName>:<sourcePath>:<lastBackupDescription>
/// ```
///
/// `version`, `numworlds`, and `lastclosed` are informational; loading
/// ignores them, as it ignores any unrecognized line. Fields are
/// colon-delimited, so a source path containing a colon cannot be
/// represented (inherited format fragility; the `outDir` value is exempt
/// because everything after the first colon is taken as the path).
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Self {
        Self::new(paths::default_profile_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile, degrading to an empty new profile if the file is
    /// unreadable or malformed. Startup never fails on a bad profile file.
    pub fn load(&self) -> Profile {
        match self.load_file() {
            Ok(profile) => profile,
            Err(e) => {
                warn!(
                    "profile at {} is unreadable, starting fresh: {e}",
                    self.path.display()
                );
                Profile::new_empty()
            }
        }
    }

    /// Strict load: a `MBMWORLD` line with the wrong field count fails the
    /// whole load with a `Parse` error naming the line. A missing file is an
    /// empty new profile, not an error.
    pub fn load_file(&self) -> Result<Profile, CoreError> {
        if !self.path.exists() {
            return Ok(Profile::new_empty());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| CoreError::Parse {
            line: 0,
            reason: format!("cannot read {}: {e}", self.path.display()),
        })?;

        let mut output_dir = None;
        let mut items: Vec<TrackedItem> = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let Some((tag, rest)) = line.split_once(':') else {
                continue;
            };
            match tag {
                OUT_DIR_TAG => output_dir = Some(PathBuf::from(rest)),
                WORLD_TAG => {
                    let fields: Vec<&str> = line.split(':').collect();
                    if fields.len() != WORLD_FIELDS {
                        return Err(CoreError::Parse {
                            line: idx + 1,
                            reason: format!(
                                "expected {WORLD_FIELDS} colon-delimited fields in a {WORLD_TAG} line, got {}",
                                fields.len()
                            ),
                        });
                    }
                    let mut item = TrackedItem::new(PathBuf::from(fields[3]), fields[2]);
                    item.last_backup = fields[4].to_string();
                    items.push(item);
                }
                _ => {}
            }
        }
        let parsed = items.len();
        let profile = Profile::loaded(output_dir, items);
        if profile.items().len() != parsed {
            warn!(
                "dropped {} duplicate item name(s) while loading {}",
                parsed - profile.items().len(),
                self.path.display()
            );
        }
        Ok(profile)
    }

    /// Overwrite the profile file, atomically: the new content lands in a
    /// temp file beside the target and replaces it only once fully written,
    /// so a failed save leaves the previous file intact.
    pub fn save(&self, profile: &Profile) -> Result<(), CoreError> {
        self.write_atomic(render(profile).as_bytes())
    }

    fn write_atomic(&self, bytes: &[u8]) -> Result<(), CoreError> {
        let write_err = |e: std::io::Error| CoreError::PersistenceWrite {
            path: self.path.clone(),
            source: e,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(bytes).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| CoreError::PersistenceWrite {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}

fn render(profile: &Profile) -> String {
    let mut out = String::new();
    out.push_str(&format!("version:{}\n", env!("CARGO_PKG_VERSION")));
    out.push_str(&format!("numworlds:{}\n", profile.items().len()));
    out.push_str(&format!(
        "lastclosed:{}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    if let Some(dir) = profile.output_dir() {
        out.push_str(&format!("{OUT_DIR_TAG}:{}\n", dir.display()));
    }
    for item in profile.items() {
        let dir_name = item
            .source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        out.push_str(&format!(
            "{WORLD_TAG}:{dir_name}:{}:{}:{}\n",
            item.name,
            item.source_path.display(),
            item.last_backup
        ));
    }
    out
}
