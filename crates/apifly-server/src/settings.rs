//! Server settings.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `APIFLY_*` environment variables. Command-line flags are applied last by the
//! binary.

use apifly_core::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

pub const ENV_HOST: &str = "APIFLY_HOST";
pub const ENV_PORT: &str = "APIFLY_PORT";
pub const ENV_LOG: &str = "APIFLY_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	pub host: String,
	pub port: u16,
	pub log_level: String,
	pub shutdown_timeout_secs: u64,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 5000,
			log_level: "info".to_string(),
			shutdown_timeout_secs: 30,
		}
	}
}

impl Settings {
	/// Parse settings from TOML text. Missing keys keep their defaults.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_server::Settings;
	///
	/// let settings = Settings::from_toml_str("port = 8080").unwrap();
	/// assert_eq!(settings.port, 8080);
	/// assert_eq!(settings.host, "127.0.0.1");
	/// ```
	pub fn from_toml_str(content: &str) -> Result<Self> {
		toml::from_str(content).map_err(|e| Error::Configuration(e.to_string()))
	}

	/// Load settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = fs::read_to_string(path)
			.map_err(|e| Error::Configuration(format!("failed to read {}: {}", path.display(), e)))?;
		Self::from_toml_str(&content)
	}

	/// Override fields from the process environment.
	pub fn apply_env(self) -> Result<Self> {
		self.apply_env_from(|key| std::env::var(key).ok())
	}

	/// Override fields using `lookup` as the environment.
	pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(host) = lookup(ENV_HOST) {
			self.host = host;
		}
		if let Some(port) = lookup(ENV_PORT) {
			self.port = port
				.trim()
				.parse()
				.map_err(|e| Error::Configuration(format!("invalid {} '{}': {}", ENV_PORT, port, e)))?;
		}
		if let Some(level) = lookup(ENV_LOG) {
			self.log_level = level;
		}
		Ok(self)
	}

	/// Address the server binds to.
	pub fn socket_addr(&self) -> Result<SocketAddr> {
		let ip: IpAddr = self
			.host
			.parse()
			.map_err(|e| Error::Configuration(format!("invalid host '{}': {}", self.host, e)))?;
		Ok(SocketAddr::new(ip, self.port))
	}

	pub fn shutdown_timeout(&self) -> Duration {
		Duration::from_secs(self.shutdown_timeout_secs)
	}
}
