//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use freightsite_geo::PathMatching;
use std::path::{Path, PathBuf};

/// Environment variable overriding the geolocation endpoint
pub const ENV_GEOIP_URL: &str = "FREIGHTSITE_GEOIP_URL";
/// Environment variable overriding the geolocation timeout
pub const ENV_GEOIP_TIMEOUT_SECS: &str = "FREIGHTSITE_GEOIP_TIMEOUT_SECS";
/// Environment variable overriding the host timezone
pub const ENV_TZ: &str = "FREIGHTSITE_TZ";
/// Environment variable overriding the path matching mode
pub const ENV_PATH_MATCHING: &str = "FREIGHTSITE_PATH_MATCHING";

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed configuration
    pub schema: ConfigSchema,
    /// File the configuration was loaded from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations,
    /// apply environment overrides, and validate the result.
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the standard locations just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        let mut config = Self {
            schema,
            path: config_path,
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `FREIGHTSITE_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(ENV_GEOIP_URL) {
            self.schema.geolocation.endpoint = url;
        }

        if let Some(secs) = lookup(ENV_GEOIP_TIMEOUT_SECS) {
            self.schema.geolocation.timeout_secs = secs.trim().parse().map_err(|_| {
                Error::invalid_config(
                    ENV_GEOIP_TIMEOUT_SECS,
                    format!("{secs:?} is not a number"),
                )
            })?;
        }

        if let Some(tz) = lookup(ENV_TZ) {
            self.schema.timezone.override_zone = Some(tz);
        }

        if let Some(mode) = lookup(ENV_PATH_MATCHING) {
            self.schema.routing.path_matching = mode
                .parse::<PathMatching>()
                .map_err(|e| Error::invalid_config(ENV_PATH_MATCHING, e))?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let geo = &self.schema.geolocation;

        if geo.endpoint.is_empty() {
            return Err(Error::invalid_config("geolocation.endpoint", "cannot be empty"));
        }

        if !geo.endpoint.starts_with("http://") && !geo.endpoint.starts_with("https://") {
            return Err(Error::invalid_config(
                "geolocation.endpoint",
                "must start with http:// or https://",
            ));
        }

        if geo.country_field.is_empty() {
            return Err(Error::invalid_config("geolocation.country_field", "cannot be empty"));
        }

        if geo.timeout_secs == 0 {
            return Err(Error::invalid_config("geolocation.timeout_secs", "cannot be zero"));
        }

        if let Some(bad) = self
            .schema
            .routing
            .global_paths
            .iter()
            .find(|p| !p.starts_with('/'))
        {
            return Err(Error::invalid_config(
                "routing.global_paths",
                format!("{bad:?} must start with '/'"),
            ));
        }

        Ok(())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = [
        ".freightsite.toml",
        "freightsite.toml",
        ".config/freightsite.toml",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();

    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("freightsite").join("config.toml"));
    }

    candidates.into_iter().find(|p| p.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.geolocation.timeout_secs, 5);
        assert_eq!(config.schema.routing.path_matching, PathMatching::Contains);
        assert_eq!(config.schema.routing.global_paths.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let file = write_config(
            r#"
            [geolocation]
            endpoint = "http://127.0.0.1:9999/json"
            timeout_secs = 2

            [timezone]
            override = "Asia/Colombo"

            [routing]
            path_matching = "segment"
            global_paths = ["/login", "/careers"]
            "#,
        );

        let config = Config::load(Some(file.path())).unwrap();
        let schema = &config.schema;
        assert_eq!(schema.geolocation.endpoint, "http://127.0.0.1:9999/json");
        assert_eq!(schema.geolocation.country_field, "country_code");
        assert_eq!(schema.geolocation.timeout_secs, 2);
        assert_eq!(schema.timezone.override_zone.as_deref(), Some("Asia/Colombo"));
        assert_eq!(schema.routing.path_matching, PathMatching::Segment);
        assert_eq!(schema.routing.global_paths, vec!["/login", "/careers"]);
        assert_eq!(config.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/freightsite.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_malformed_file() {
        let file = write_config("[geolocation\nendpoint = ");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_file_accepts_matching_aliases() {
        for (alias, expected) in [
            ("exact", PathMatching::Segment),
            ("strict", PathMatching::Segment),
            ("substring", PathMatching::Contains),
            ("loose", PathMatching::Contains),
        ] {
            let file = write_config(&format!("[routing]\npath_matching = \"{alias}\"\n"));
            let config = Config::load(Some(file.path())).unwrap();
            assert_eq!(config.schema.routing.path_matching, expected, "{alias}");

            let mut from_env = Config::default();
            from_env
                .apply_env_with(|key| (key == ENV_PATH_MATCHING).then(|| alias.to_string()))
                .unwrap();
            assert_eq!(from_env.schema.routing.path_matching, expected, "{alias}");
        }
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_GEOIP_URL, "https://geo.internal/lookup"),
            (ENV_GEOIP_TIMEOUT_SECS, "9"),
            (ENV_TZ, "Asia/Kolkata"),
            (ENV_PATH_MATCHING, "segment"),
        ]);

        let mut config = Config::default();
        config
            .apply_env_with(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.schema.geolocation.endpoint, "https://geo.internal/lookup");
        assert_eq!(config.schema.geolocation.timeout_secs, 9);
        assert_eq!(config.schema.timezone.override_zone.as_deref(), Some("Asia/Kolkata"));
        assert_eq!(config.schema.routing.path_matching, PathMatching::Segment);
    }

    #[test]
    fn test_env_override_rejects_bad_values() {
        let mut config = Config::default();
        let err = config
            .apply_env_with(|key| (key == ENV_GEOIP_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);

        let err = config
            .apply_env_with(|key| (key == ENV_PATH_MATCHING).then(|| "fuzzy".to_string()))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.schema.geolocation.endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.schema.geolocation.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.schema.routing.global_paths.push("careers".to_string());
        assert!(config.validate().is_err());
    }
}
