//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "content-council";
const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];
const ENV_PREFIX: &str = "CONTENT_COUNCIL_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Environment: `CONTENT_COUNCIL_<SECTION>__<KEY>`
    /// 3. Project root: `./council.toml` or `./.council.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/content-council/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/content-council/config.toml` or the platform
    /// equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<7}] --config: {}", mark, path.display());
        }

        println!("  [ENV    ] {}<SECTION>__<KEY>", ENV_PREFIX);

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND  ] Project: {}", path.display()),
            None => println!("  [       ] Project: ./council.toml or ./.council.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "" };
            println!("  [{:<7}] Global:  {}", mark, path.display());
        }

        println!("  [       ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.models.primary.is_none());
        assert_eq!(config.council.max_iterations, 3);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains(APP_DIR));
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        let project = toml_file(
            r#"
[council]
threshold = 60
max_iterations = 4
"#,
        );
        let explicit = toml_file(
            r#"
[council]
threshold = 90
"#,
        );

        let config: FileConfig =
            ConfigLoader::figment(None, Some(project.path()), Some(explicit.path()))
                .extract()
                .unwrap();

        assert_eq!(config.council.threshold, 90.0);
        // untouched keys survive from lower layers
        assert_eq!(config.council.max_iterations, 4);
        assert!(config.output.color);
    }

    #[test]
    fn test_missing_global_file_is_skipped() {
        let config: FileConfig = ConfigLoader::figment(
            Some(Path::new("/nonexistent/content-council/config.toml")),
            None,
            None,
        )
        .extract()
        .unwrap();
        assert_eq!(config.council.threshold, 85.0);
    }

    #[test]
    fn test_invalid_value_type_is_an_error() {
        let explicit = toml_file(
            r#"
[council]
max_iterations = "lots"
"#,
        );
        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(explicit.path())).extract();
        assert!(result.is_err());
    }
}
