mod types;

pub use types::{parse_hex_color, Config, ConfigIssue, PreviewConfig, ShimmerSection, StopConfig};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

pub type SharedConfig = Arc<RwLock<Config>>;

/// Editors fire several events per save; changes closer together than this
/// are folded into one reload.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(500);

/// Parses a config document without validating it.
pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

/// Loads and validates the config at `config_path`.
///
/// Missing, unreadable, unparseable or invalid files fall back to defaults;
/// every problem is logged.
pub fn load_config(config_path: &Path) -> Config {
    let Some(config) = read_config(config_path) else {
        return Config::default();
    };

    if report_issues(&config.validate()) {
        config
    } else {
        Config::default()
    }
}

fn read_config(config_path: &Path) -> Option<Config> {
    if !config_path.exists() {
        log::info!(
            "{} does not exist; using built-in preview settings",
            config_path.display()
        );
        return None;
    }

    let contents = match std::fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Cannot read {}: {}", config_path.display(), e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::info!("Using preview settings from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::error!("{} is not a valid shimmer config: {}", config_path.display(), e);
            None
        }
    }
}

/// Logs each issue. Returns false if any of them is an error.
fn report_issues(issues: &[ConfigIssue]) -> bool {
    let mut errors = 0;
    for issue in issues {
        if issue.is_error {
            errors += 1;
            log::error!("{}", issue);
        } else {
            log::warn!("{}", issue);
        }
    }

    if errors > 0 {
        log::error!(
            "Ignoring config: {} error(s), {} warning(s)",
            errors,
            issues.len() - errors
        );
    }
    errors == 0
}

pub fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("shimmer")
        .join("preview.toml")
}

/// Directory holding `config_path`; a bare file name lives in ".".
fn watch_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Swaps a fresh config into a [`SharedConfig`] whenever its file changes.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    config: SharedConfig,
    config_path: PathBuf,
    last_reload: Mutex<Option<Instant>>,
}

impl ConfigWatcher {
    pub fn new(config: SharedConfig, config_path: PathBuf) -> Result<Self, notify::Error> {
        let (tx, events) = channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;

        // Saving by rename replaces the file, so watch its directory instead.
        let dir = watch_dir(&config_path);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            log::warn!("Cannot create {}: {}", dir.display(), e);
        }
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        log::debug!("Watching {} for config changes", dir.display());

        Ok(Self {
            _watcher: watcher,
            events,
            config,
            config_path,
            last_reload: Mutex::new(None),
        })
    }

    /// Drains pending events; true if any of them wrote the config file.
    fn config_touched(&self) -> bool {
        let name = self.config_path.file_name();
        let mut touched = false;
        for event in self.events.try_iter() {
            match event {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    touched |= event.paths.iter().any(|p| p.file_name() == name);
                }
                Ok(_) => {}
                Err(e) => log::warn!("Watching {} failed: {}", self.config_path.display(), e),
            }
        }
        touched
    }

    /// Reloads the shared config if its file changed. Returns true on reload.
    pub fn check_and_reload(&self) -> bool {
        if !self.config_touched() {
            return false;
        }

        let now = Instant::now();
        let Ok(mut last_reload) = self.last_reload.lock() else {
            return false;
        };
        let previous = *last_reload;
        if previous.is_some_and(|at| now.duration_since(at) < RELOAD_DEBOUNCE) {
            return false;
        }

        log::info!("{} changed; reloading", self.config_path.display());
        let fresh = load_config(&self.config_path);
        match self.config.write() {
            Ok(mut config) => {
                *config = fresh;
                *last_reload = Some(now);
                true
            }
            Err(_) => {
                log::error!("Shared config lock is poisoned; keeping previous settings");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_location() {
        let path = get_config_path();
        assert!(path.ends_with(".config/shimmer/preview.toml"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("shimmer-missing-config-does-not-exist.toml");
        let config = load_config(&path);
        assert_eq!(config.size(), (320, 96));
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("shimmer-invalid-{}.toml", std::process::id()));
        std::fs::write(&path, "[preview]\ndirection = \"sideways\"\nwidth = 10\n").unwrap();
        let config = load_config(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(config.preview.direction, "ltr");
        assert_eq!(config.size(), (320, 96));
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("shimmer-valid-{}.toml", std::process::id()));
        std::fs::write(&path, "[preview]\nwidth = 10\nheight = 12\n").unwrap();
        let config = load_config(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(config.size(), (10, 12));
    }

    #[test]
    fn test_overflowing_cycle_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("shimmer-overflow-{}.toml", std::process::id()));
        std::fs::write(&path, "[shimmer]\nduration = 1.0e19\nbounce = true\n").unwrap();
        let config = load_config(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(config.shimmer.duration, 1.5);
        assert_eq!(config.cycle_length(), Duration::from_millis(1750));
    }

    #[test]
    fn test_report_issues_rejects_errors_only() {
        assert!(report_issues(&[]));
        assert!(report_issues(&[ConfigIssue::warning("w")]));
        assert!(!report_issues(&[ConfigIssue::warning("w"), ConfigIssue::error("e")]));
    }

    #[test]
    fn test_watch_dir() {
        assert_eq!(watch_dir(Path::new("preview.toml")), PathBuf::from("."));
        assert_eq!(watch_dir(Path::new("/tmp/a/preview.toml")), PathBuf::from("/tmp/a"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(parse_config("[preview\nwidth = ").is_err());
    }
}
