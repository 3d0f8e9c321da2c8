//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// An absolute `config_name` is used as is.
///
/// # Example
/// ```text
/// /home/user/site/templates/  ← start
/// /home/user/site/podpage.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("podpage.toml");
        fs::write(&config, "").unwrap();
        let nested = dir.path().join("templates").join("partials");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(Path::new("podpage.toml"), &nested).unwrap();
        assert_eq!(found, config);
    }

    #[test]
    fn test_find_config_absolute() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("custom.toml");
        assert_eq!(find_config_file(&config, dir.path()), None);

        fs::write(&config, "").unwrap();
        assert_eq!(find_config_file(&config, Path::new("/")), Some(config));
    }

    #[test]
    fn test_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            find_config_file(Path::new("does-not-exist-podpage.toml"), dir.path()),
            None
        );
    }
}
