//! Configuration management for Pinboard Server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Filesystem layout served and mutated by the server.
///
/// Everything hangs off `root`: the data directory with the pin collection,
/// the uploaded PDF directory, and the extracted image directory. Pin fields
/// (`pdf`, `image`) store root-relative paths, so the extraction job can run
/// from the root with the same layout.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub pdf_dir: PathBuf,
    pub images_dir: PathBuf,
}

impl PathsConfig {
    /// Absolute (root-joined) path of the data directory
    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }

    /// Absolute path of the pin collection file
    pub fn pins_file(&self) -> PathBuf {
        self.data_path().join("pins.json")
    }

    /// Absolute path of the calculator product file
    pub fn calculator_file(&self) -> PathBuf {
        self.data_path().join("calculator.json")
    }

    /// Absolute path of the uploaded PDF directory
    pub fn pdf_path(&self) -> PathBuf {
        self.root.join(&self.pdf_dir)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Override for the extraction job executable. When unset the job is
    /// looked up next to the server executable.
    pub command: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            paths: PathsConfig {
                root: PathBuf::from("."),
                data_dir: PathBuf::from("data"),
                pdf_dir: PathBuf::from("assets/pdf"),
                images_dir: PathBuf::from("assets/images"),
            },
            extraction: ExtractionConfig { command: None },
        }
    }
}

impl Config {
    /// Build the configuration from the environment, falling back to the
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }
        if let Ok(root) = env::var("PINBOARD_ROOT") {
            config.paths.root = PathBuf::from(root);
        }
        config.extraction.command = env::var("PINBOARD_EXTRACT_BIN").ok().map(PathBuf::from);

        config
    }
}
