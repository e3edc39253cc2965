//! Turns configured directory strings into absolute paths.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves `path` as written in a configuration file located in `config_dir`.
///
/// `~` and `~/…` expand to the home directory, relative paths join
/// `config_dir`, absolute paths pass through. Nothing is checked on disk.
pub fn resolve_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let home_relative = match path {
        "~" => Some(""),
        _ => path.strip_prefix("~/"),
    };

    let path = match home_relative {
        Some(rest) => {
            let dirs = BaseDirs::new().ok_or(ConfigError::NoHome)?;
            let home = dirs.home_dir();
            if rest.is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            }
        }
        None => PathBuf::from(path),
    };

    Ok(if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_to_config_dir() {
        assert_eq!(
            resolve_path("docs", Path::new("/project")).unwrap(),
            PathBuf::from("/project/docs")
        );
        assert_eq!(
            resolve_path(".sift/index", Path::new("/project")).unwrap(),
            PathBuf::from("/project/.sift/index")
        );
    }

    #[test]
    fn absolute_passes_through() {
        assert_eq!(
            resolve_path("/srv/docs", Path::new("/project")).unwrap(),
            PathBuf::from("/srv/docs")
        );
    }

    #[test]
    fn home_expansion() {
        let Some(dirs) = BaseDirs::new() else {
            return;
        };
        assert_eq!(
            resolve_path("~/notes", Path::new("/project")).unwrap(),
            dirs.home_dir().join("notes")
        );
        assert_eq!(resolve_path("~", Path::new("/x")).unwrap(), dirs.home_dir());
    }

    #[test]
    fn tilde_inside_name_is_literal() {
        assert_eq!(
            resolve_path("~backup", Path::new("/p")).unwrap(),
            PathBuf::from("/p/~backup")
        );
    }
}
