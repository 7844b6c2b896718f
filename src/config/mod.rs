use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_radius() -> u32 {
    1000
}
fn default_step_lat() -> f64 {
    0.02
}
fn default_step_lon() -> f64 {
    0.03
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default = "default_step_lat")]
    pub step_lat: f64,
    #[serde(default = "default_step_lon")]
    pub step_lon: f64,
    #[serde(default)]
    pub rules: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub overpass: Option<OverpassConfig>,
    #[serde(default)]
    pub ors: Option<OrsConfig>,
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_overpass_timeout_secs() -> u64 {
    180
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverpassConfig {
    #[serde(default = "default_overpass_url")]
    pub url: String,
    #[serde(default = "default_overpass_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: default_overpass_url(),
            timeout_secs: default_overpass_timeout_secs(),
        }
    }
}

fn default_ors_url() -> String {
    "https://api.openrouteservice.org/pois".to_string()
}

fn default_ors_timeout_secs() -> u64 {
    60
}

fn default_ors_key_file() -> PathBuf {
    PathBuf::from("secrets/ors_secret.txt")
}

#[derive(Debug, Deserialize, Clone)]
pub struct OrsConfig {
    #[serde(default = "default_ors_url")]
    pub url: String,
    #[serde(default = "default_ors_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_ors_key_file")]
    pub key_file: PathBuf,
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            url: default_ors_url(),
            timeout_secs: default_ors_timeout_secs(),
            key_file: default_ors_key_file(),
        }
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("hoodscout.toml"));
    paths.push(PathBuf::from(".hoodscout.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("hoodscout").join("config.toml"));
        paths.push(config_dir.join("hoodscout.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".hoodscout.toml"));
        paths.push(home.join(".config").join("hoodscout").join("config.toml"));
    }

    paths
}

/// Read the OpenRouteService API key: the first line of a local secret file.
///
/// A missing or empty file is a configuration error; keys are issued at
/// <https://account.heigit.org/signup>.
pub fn read_ors_api_key(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read ORS API key file {:?}; get a key at https://account.heigit.org/signup",
            path
        )
    })?;

    let key = contents.lines().next().unwrap_or("").trim().to_string();
    if key.is_empty() {
        anyhow::bail!("ORS API key file {:?} is empty", path);
    }

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_file_config() {
        let config: FileConfig = toml::from_str(
            r#"
lat = 55.748
lon = 48.746
radius = 2500

[overpass]
timeout_secs = 60

[ors]
key_file = "keys/ors.txt"
"#,
        )
        .unwrap();

        assert_eq!(config.lat, Some(55.748));
        assert_eq!(config.radius, 2500);
        assert_eq!(config.step_lat, 0.02);
        assert_eq!(config.step_lon, 0.03);

        let overpass = config.overpass.unwrap();
        assert_eq!(overpass.timeout_secs, 60);
        assert_eq!(overpass.url, default_overpass_url());

        let ors = config.ors.unwrap();
        assert_eq!(ors.key_file, PathBuf::from("keys/ors.txt"));
        assert_eq!(ors.url, default_ors_url());
    }

    #[test]
    fn test_read_ors_api_key_first_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "abc123-key").unwrap();
        writeln!(file, "trailing junk").unwrap();

        let key = read_ors_api_key(file.path()).unwrap();
        assert_eq!(key, "abc123-key");
    }

    #[test]
    fn test_missing_or_empty_key_file_is_an_error() {
        assert!(read_ors_api_key(Path::new("no/such/secret.txt")).is_err());

        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_ors_api_key(file.path()).is_err());
    }
}
