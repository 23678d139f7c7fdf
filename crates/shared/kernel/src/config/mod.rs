use atria_domain::config::StudioConfig;
use config::{Config, Environment, File};
use fxhash::FxHashSet;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default base name of the studio config file (`studio.toml`, `studio.json`, ...).
const DEFAULT_FILE: &str = "studio";
/// Environment prefix, e.g. `SANITY_STUDIO_DATASET` maps to `dataset`.
const ENV_PREFIX: &str = "SANITY_STUDIO";

#[atria_derive::atria_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    /// A value the host needs is absent or empty.
    #[error("Missing configuration value{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: an optional file overlaid with environment variables.
///
/// 1. **File**: an explicit path must exist; without one, `studio.*` in the working
///    directory is used when present.
/// 2. **Environment**: variables prefixed with `SANITY_STUDIO_` override file values.
///    Nested keys use double underscores (`SANITY_STUDIO_SCHEMA__ADS_PAGE=plain`).
#[derive(Debug, Default)]
#[must_use = "call .load() to read the configuration"]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an explicit config file, which then becomes required.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the process environment with a fixed variable map.
    pub fn env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Builds and deserializes the layered configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] if an explicit file is missing or unreadable,
    /// or the merged values do not fit `T`.
    pub fn load<T>(self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let file = match &self.path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                File::from(path.as_path()).required(true)
            },
            None => {
                debug!("No config path given, looking for '{DEFAULT_FILE}.*'");
                File::with_name(DEFAULT_FILE).required(false)
            },
        };

        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .convert_case(config::Case::Snake)
            .try_parsing(true)
            .source(self.env);

        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")
    }
}

/// Loads `T` from an optional file plus `SANITY_STUDIO_*` environment overrides.
///
/// # Errors
/// See [`ConfigLoader::load`].
///
/// # Example
/// ```rust,no_run
/// use atria_kernel::config::load_config;
/// use atria_kernel::domain::config::StudioConfig;
///
/// let cfg: StudioConfig = load_config(None::<&str>).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader.file(path).load(),
        None => loader.load(),
    }
}

/// Presence check for the values handed to the host. Values stay opaque: nothing is
/// parsed, only emptiness and duplicate workspace names are rejected.
///
/// # Errors
/// Returns [`ConfigError::Missing`] for the first absent value.
pub fn check_presence(cfg: &StudioConfig) -> Result<(), ConfigError> {
    require(&cfg.project_id, "project_id")?;
    require(&cfg.dataset, "dataset")?;

    if cfg.workspaces.is_empty() {
        return Err(ConfigError::Missing {
            message: "at least one workspace is required".into(),
            context: Some("workspaces".into()),
        });
    }

    let mut names = FxHashSet::default();
    for (index, workspace) in cfg.workspaces.iter().enumerate() {
        let context: Cow<'static, str> = format!("workspaces[{index}]").into();
        require(&workspace.name, "name").context(context.clone())?;
        require(&workspace.dataset, "dataset").context(context.clone())?;
        if !names.insert(workspace.name.as_str()) {
            return Err(ConfigError::Missing {
                message: format!("workspace name '{}' is used twice", workspace.name).into(),
                context: Some(context),
            });
        }
    }

    Ok(())
}

fn require(value: &str, key: &'static str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Missing { message: key.into(), context: None });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atria_domain::config::AdsPageRevision;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let cfg: StudioConfig = ConfigLoader::new().env_source(HashMap::new()).load().unwrap();
        assert_eq!(cfg.dataset, "development");
        assert_eq!(cfg.workspaces.len(), 2);
        check_presence(&cfg).unwrap();
    }

    #[test]
    fn environment_overrides_dataset_and_app_id() {
        let cfg: StudioConfig = ConfigLoader::new()
            .env_source(env(&[
                ("SANITY_STUDIO_DATASET", "production"),
                ("SANITY_STUDIO_APP_ID", "app-42"),
                ("SANITY_STUDIO_SCHEMA__ADS_PAGE", "plain"),
            ]))
            .load()
            .unwrap();

        assert_eq!(cfg.dataset, "production");
        assert_eq!(cfg.app_id, "app-42");
        assert_eq!(cfg.schema.ads_page, AdsPageRevision::Plain);
    }

    #[test]
    fn file_values_are_overlaid_by_env() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "project_id = \"fromfile\"\ndataset = \"filedata\"\nauto_updates = false").unwrap();

        let cfg: StudioConfig = ConfigLoader::new()
            .file(file.path())
            .env_source(env(&[("SANITY_STUDIO_DATASET", "envdata")]))
            .load()
            .unwrap();

        assert_eq!(cfg.project_id, "fromfile");
        assert_eq!(cfg.dataset, "envdata");
        assert!(!cfg.auto_updates);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let res: Result<StudioConfig, _> = ConfigLoader::new()
            .file("/nonexistent/studio.toml")
            .env_source(HashMap::new())
            .load();
        assert!(matches!(res, Err(ConfigError::Config { .. })));
    }

    #[test]
    fn presence_check_rejects_empty_values() {
        let mut cfg = StudioConfig::default();
        cfg.project_id = " ".to_owned();
        assert!(matches!(check_presence(&cfg), Err(ConfigError::Missing { .. })));

        let mut cfg = StudioConfig::default();
        let first = cfg.workspaces[0].clone();
        cfg.workspaces.push(first);
        let err = check_presence(&cfg).unwrap_err();
        assert!(err.to_string().contains("used twice"));
    }
}
