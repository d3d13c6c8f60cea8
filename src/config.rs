use anyhow::{Context, Result};
use gitway_core::{Credentials, DEFAULT_FETCH_INTERVAL};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_REPOSITORY: &str = "https://github.com/PaulFarver/git-way";
pub const DEFAULT_DIRECTORY: &str = "repositories/git-way";

/// Options read from the configuration file, all optional
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// Remote URL to mirror
    pub repository: Option<String>,
    pub user: Option<String>,
    pub token: Option<String>,
    /// Where the local mirror lives
    pub directory: Option<PathBuf>,
    /// Seconds between background fetches
    pub fetchinterval: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

/// Resolved settings the service starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub repository: String,
    pub directory: PathBuf,
    pub credentials: Option<Credentials>,
    pub fetch_interval: Duration,
}

impl Configuration {
    /// Load from `path`. No path, or a path that does not exist, yields the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!("Configuration {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read configuration {}", path.display()))
            }
        };

        Self::parse(&content, Format::of(path))
            .with_context(|| format!("Failed to parse configuration {}", path.display()))
    }

    pub fn parse(content: &str, format: Format) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = match format {
            Format::Yaml => serde_yaml::from_str(content)?,
            Format::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Apply defaults. Empty strings count as unset.
    pub fn resolve(self) -> Settings {
        let repository = non_empty(self.repository).unwrap_or_else(|| DEFAULT_REPOSITORY.to_string());
        let directory = self
            .directory
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIRECTORY));

        let credentials = Credentials::from_parts(self.user.as_deref(), self.token.as_deref());
        if credentials.is_none() && (non_empty(self.user).is_some() || non_empty(self.token).is_some()) {
            warn!("Both user and token are needed for authentication, connecting anonymously");
        }

        let fetch_interval = match self.fetchinterval {
            Some(seconds) if seconds >= 1 => Duration::from_secs(seconds as u64),
            _ => DEFAULT_FETCH_INTERVAL,
        };

        Settings {
            repository,
            directory,
            credentials,
            fetch_interval,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Configuration::default().resolve();
        assert_eq!(
            settings,
            Settings {
                repository: DEFAULT_REPOSITORY.to_string(),
                directory: PathBuf::from(DEFAULT_DIRECTORY),
                credentials: None,
                fetch_interval: Duration::from_secs(60),
            }
        );
    }

    #[test]
    fn test_yaml_configuration() {
        let yaml = "\
repository: https://example.com/team/app.git
user: bot
token: abc123
directory: /var/lib/gitway/app
fetchinterval: 300
";
        let settings = Configuration::parse(yaml, Format::Yaml).unwrap().resolve();
        assert_eq!(settings.repository, "https://example.com/team/app.git");
        assert_eq!(settings.directory, PathBuf::from("/var/lib/gitway/app"));
        assert_eq!(settings.credentials, Some(Credentials::new("bot", "abc123")));
        assert_eq!(settings.fetch_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_toml_configuration() {
        let toml = "repository = \"https://example.com/x.git\"\nfetchinterval = 5\n";
        let settings = Configuration::parse(toml, Format::Toml).unwrap().resolve();
        assert_eq!(settings.repository, "https://example.com/x.git");
        assert_eq!(settings.fetch_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_interval_below_one_uses_default() {
        for value in [0, -10] {
            let config = Configuration {
                fetchinterval: Some(value),
                ..Default::default()
            };
            assert_eq!(config.resolve().fetch_interval, DEFAULT_FETCH_INTERVAL);
        }
    }

    #[test]
    fn test_credentials_need_user_and_token() {
        let config = Configuration {
            user: Some("bot".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve().credentials, None);

        let config = Configuration {
            user: Some("".to_string()),
            token: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve().credentials, None);
    }

    #[test]
    fn test_empty_strings_fall_back() {
        let config = Configuration::parse("repository: \"\"\ndirectory: \"\"\n", Format::Yaml).unwrap();
        let settings = config.resolve();
        assert_eq!(settings.repository, DEFAULT_REPOSITORY);
        assert_eq!(settings.directory, PathBuf::from(DEFAULT_DIRECTORY));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let yaml = dir.path().join("gitway.yaml");
        fs::write(&yaml, "fetchinterval: 42\n").unwrap();
        let toml = dir.path().join("gitway.toml");
        fs::write(&toml, "fetchinterval = 7\n").unwrap();

        assert_eq!(Configuration::load(Some(yaml.as_path())).unwrap().fetchinterval, Some(42));
        assert_eq!(Configuration::load(Some(toml.as_path())).unwrap().fetchinterval, Some(7));
        assert_eq!(
            Configuration::load(Some(dir.path().join("missing.yaml").as_path())).unwrap(),
            Configuration::default()
        );
        assert_eq!(Configuration::load(None).unwrap(), Configuration::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "fetchinterval: [not, a, number]\n").unwrap();
        assert!(Configuration::load(Some(path.as_path())).is_err());
    }
}
