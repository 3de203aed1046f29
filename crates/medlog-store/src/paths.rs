//! Path resolution for per-user data files

use std::path::{Path, PathBuf};

/// Filename prefix of raw entry files
pub const ENTRIES_PREFIX: &str = "voice_entries_";

/// Filename prefix of structured record files
pub const RECORDS_PREFIX: &str = "structured_medicines_";

/// User id used when the caller supplies an empty one
pub const DEFAULT_USER: &str = "default";

/// Trim a user id, falling back to [`DEFAULT_USER`] when empty
pub fn normalize_user(user: &str) -> String {
    let trimmed = user.trim();
    if trimmed.is_empty() {
        DEFAULT_USER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Filename-safe form of a user id
fn file_key(user: &str) -> String {
    normalize_user(user)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolves standard paths under the data directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve the platform data directory (`$XDG_DATA_HOME/medlog` and friends)
    pub fn new() -> std::io::Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "data directory not found")
        })?;
        Ok(Self {
            data_dir: base.join("medlog"),
        })
    }

    /// Use an explicit data directory
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Get medlog.json path
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("medlog.json")
    }

    /// Get the raw entry file for a user
    pub fn entries_file(&self, user: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}{}.json", ENTRIES_PREFIX, file_key(user)))
    }

    /// Get the structured record file for a user
    pub fn records_file(&self, user: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}{}.json", RECORDS_PREFIX, file_key(user)))
    }
}

/// `medicine_list_{stamp}.txt` under `dir`
pub fn text_export_file(dir: &Path, stamp: &str) -> PathBuf {
    dir.join(format!("medicine_list_{}.txt", stamp))
}

/// `structured_medicines_{user}_{stamp}.csv` under `dir`
pub fn csv_export_file(dir: &Path, user: &str, stamp: &str) -> PathBuf {
    dir.join(format!("{}{}_{}.csv", RECORDS_PREFIX, file_key(user), stamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_user() {
        assert_eq!(normalize_user("  alice "), "alice");
        assert_eq!(normalize_user(""), "default");
        assert_eq!(normalize_user("   "), "default");
    }

    #[test]
    fn test_user_files() {
        let paths = Paths::from_dir("/tmp/medlog");
        assert!(paths
            .entries_file("user_a")
            .ends_with("voice_entries_user_a.json"));
        assert!(paths
            .records_file("user_a")
            .ends_with("structured_medicines_user_a.json"));
        assert!(paths.entries_file("").ends_with("voice_entries_default.json"));
    }

    #[test]
    fn test_user_id_cannot_escape_data_dir() {
        let paths = Paths::from_dir("/tmp/medlog");
        let file = paths.entries_file("../../etc/passwd");
        assert_eq!(file.parent().unwrap(), Path::new("/tmp/medlog"));
        assert!(file.ends_with("voice_entries_______etc_passwd.json"));
    }

    #[test]
    fn test_export_files() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            text_export_file(dir, "20250101_080000"),
            dir.join("medicine_list_20250101_080000.txt")
        );
        assert_eq!(
            csv_export_file(dir, "a b", "20250101_080000"),
            dir.join("structured_medicines_a_b_20250101_080000.csv")
        );
    }

    #[test]
    fn test_config_file() {
        let paths = Paths::from_dir("/tmp/medlog");
        assert!(paths.config_file().ends_with("medlog.json"));
    }
}
