use crate::config::schema::LoadTestOptions;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use validator::Validate;

/// Values given explicitly on the command line. `None` means "not given",
/// so the file (or the default) wins.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub requests: Option<usize>,
    pub clients: Option<usize>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<LoadTestOptions> {
        let options = Self::load_file(path.as_ref())?;
        options.validate().map_err(|e| Error::Validation(e))?;
        Ok(options)
    }

    /// Builds the final options: defaults, then the optional file, then CLI flags.
    pub fn resolve(file: Option<&Path>, overrides: CliOverrides) -> Result<LoadTestOptions> {
        let base = match file {
            Some(path) => Self::load_file(path)?,
            None => LoadTestOptions::default(),
        };

        let options = Self::merge(base, overrides);
        options.validate().map_err(|e| Error::Validation(e))?;
        Ok(options)
    }

    fn load_file(path: &Path) -> Result<LoadTestOptions> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(Error::Config(format!(
                "Unsupported file extension: {}",
                path.display()
            ))),
        }
    }

    fn merge(mut base: LoadTestOptions, overrides: CliOverrides) -> LoadTestOptions {
        if let Some(url) = overrides.url {
            base.url = url;
        }
        if let Some(requests) = overrides.requests {
            base.requests = requests;
        }
        if let Some(clients) = overrides.clients {
            base.clients = clients;
        }
        base
    }
}
