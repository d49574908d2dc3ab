//! Data directory and config file resolution.
//!
//! Every command that touches persisted state goes through
//! [`ForgeContext`] so the library, templates, history and config always
//! come from the same directory. The directory is picked in order from
//! the `--data-dir` flag, the `PROMPTFORGE_HOME` environment variable,
//! and finally `./.promptforge`.

use crate::config::Config;
use crate::error::{ForgeError, Result};
use crate::storage::FileStorage;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "PROMPTFORGE_HOME";

/// Data directory used when neither flag nor environment names one.
pub const DEFAULT_DATA_DIR: &str = ".promptforge";

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Resolved locations for one invocation. All paths are absolute.
#[derive(Debug, Clone)]
pub struct ForgeContext {
    /// Directory holding `library.json`, `templates.json`, `history.json`.
    pub data_dir: PathBuf,

    /// Config file, `<data_dir>/config.yaml` unless overridden.
    pub config_path: PathBuf,
}

impl ForgeContext {
    /// Resolve the context from the current working directory.
    pub fn resolve(data_dir: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            ForgeError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(&cwd, data_dir, config))
    }

    /// Resolve the context relative to a specific directory.
    pub fn resolve_from<P: AsRef<Path>>(
        cwd: P,
        data_dir: Option<&Path>,
        config: Option<&Path>,
    ) -> Self {
        let cwd = cwd.as_ref();
        let data_dir = choose_data_dir(cwd, data_dir, env::var_os(DATA_DIR_ENV));
        let config_path = match config {
            Some(path) => absolute(cwd, path),
            None => data_dir.join(CONFIG_FILE),
        };

        tracing::debug!(
            data_dir = %data_dir.display(),
            config = %config_path.display(),
            "resolved context"
        );

        Self {
            data_dir,
            config_path,
        }
    }

    /// Storage over the data directory.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }

    /// Load the config file, or the defaults when it does not exist.
    pub fn load_config(&self) -> Result<Config> {
        Config::load_or_default(&self.config_path)
    }
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn choose_data_dir(cwd: &Path, flag: Option<&Path>, env_value: Option<OsString>) -> PathBuf {
    if let Some(flag) = flag {
        return absolute(cwd, flag);
    }
    if let Some(value) = env_value
        && !value.is_empty()
    {
        return absolute(cwd, Path::new(&value));
    }
    cwd.join(DEFAULT_DATA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    struct EnvGuard(Option<OsString>);

    impl EnvGuard {
        fn set(value: Option<&str>) -> Self {
            let previous = env::var_os(DATA_DIR_ENV);
            // SAFETY: tests touching the environment are serialized.
            unsafe {
                match value {
                    Some(v) => env::set_var(DATA_DIR_ENV, v),
                    None => env::remove_var(DATA_DIR_ENV),
                }
            }
            Self(previous)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: see EnvGuard::set.
            unsafe {
                match &self.0 {
                    Some(v) => env::set_var(DATA_DIR_ENV, v),
                    None => env::remove_var(DATA_DIR_ENV),
                }
            }
        }
    }

    #[test]
    fn test_flag_wins() {
        let dir = choose_data_dir(
            Path::new("/work"),
            Some(Path::new("store")),
            Some(OsString::from("/env")),
        );
        assert_eq!(dir, PathBuf::from("/work/store"));
    }

    #[test]
    fn test_env_before_default() {
        let dir = choose_data_dir(Path::new("/work"), None, Some(OsString::from("/env/pf")));
        assert_eq!(dir, PathBuf::from("/env/pf"));

        let dir = choose_data_dir(Path::new("/work"), None, Some(OsString::new()));
        assert_eq!(dir, PathBuf::from("/work/.promptforge"));
    }

    #[test]
    #[serial]
    fn test_resolve_reads_environment() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("home");
        let _guard = EnvGuard::set(home.to_str());

        let ctx = ForgeContext::resolve_from(temp_dir.path(), None, None);

        assert_eq!(ctx.data_dir, home);
        assert_eq!(ctx.config_path, home.join(CONFIG_FILE));
    }

    #[test]
    #[serial]
    fn test_resolve_default_and_config_override() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = EnvGuard::set(None);

        let ctx = ForgeContext::resolve_from(temp_dir.path(), None, Some(Path::new("pf.yaml")));

        assert_eq!(ctx.data_dir, temp_dir.path().join(DEFAULT_DATA_DIR));
        assert_eq!(ctx.config_path, temp_dir.path().join("pf.yaml"));
    }

    #[test]
    #[serial]
    fn test_missing_config_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = EnvGuard::set(None);
        let ctx = ForgeContext::resolve_from(temp_dir.path(), None, None);

        assert_eq!(ctx.load_config().unwrap(), Config::default());
    }
}
