// file: src/utils/system.rs
// version: 2.0.0
// guid: 1a25d051-4edd-4bdd-9db2-bc7845b4395d

//! System utility functions

use std::path::{Path, PathBuf};
use tracing::debug;

/// System utility functions
pub struct SystemUtils;

impl SystemUtils {
    /// Check if a command exists in PATH
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }

    /// Expand `~` and `$VAR` in a user-supplied path
    pub fn expand_path(raw: &str) -> PathBuf {
        match shellexpand::full(raw) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(e) => {
                debug!("Leaving path '{}' unexpanded: {}", raw, e);
                PathBuf::from(shellexpand::tilde(raw).as_ref())
            }
        }
    }

    /// Locate an executable given either a path or a bare command name.
    ///
    /// Anything containing a path separator is taken as a path and must exist;
    /// bare names are looked up on `PATH`.
    pub fn resolve_executable(name_or_path: &str) -> Option<PathBuf> {
        let expanded = Self::expand_path(name_or_path);
        if expanded.components().count() > 1 || expanded.is_absolute() {
            return Self::is_executable(&expanded).then_some(expanded);
        }
        which::which(&expanded).ok()
    }

    /// Whether `path` is a file we could execute
    pub fn is_executable(path: &Path) -> bool {
        let Ok(metadata) = std::fs::metadata(path) else {
            return false;
        };
        if !metadata.is_file() {
            return false;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode() & 0o111 != 0
        }
        #[cfg(not(unix))]
        {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(SystemUtils::command_exists("sh"));
        assert!(!SystemUtils::command_exists("nonexistent-command-12345"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = SystemUtils::expand_path("~/vcsa.json");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("vcsa.json"));
    }

    #[test]
    fn test_expand_path_plain() {
        assert_eq!(
            SystemUtils::expand_path("out/vcsa.json"),
            PathBuf::from("out/vcsa.json")
        );
    }

    #[test]
    fn test_resolve_executable() {
        assert!(SystemUtils::resolve_executable("sh").is_some());
        assert!(SystemUtils::resolve_executable("nonexistent-command-12345").is_none());
        assert!(SystemUtils::resolve_executable("/nonexistent/dir/vcsa-deploy").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable_checks_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("tool");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!SystemUtils::is_executable(&path));

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(SystemUtils::is_executable(&path));
        assert!(!SystemUtils::is_executable(temp_dir.path()));
    }
}
