use directories::ProjectDirs;
use std::path::PathBuf;

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "worldkeeper", "WorldKeeper") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Default location of the profile file. The file name is inherited from the
/// legacy tool so an existing profile can be dropped in as-is.
pub fn default_profile_file() -> PathBuf {
    data_root().join("data.MBM")
}
