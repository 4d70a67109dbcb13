use serde::Deserialize;
use thiserror::Error;

/// What the reactor does when a reaction panics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReactionErrorHandling {
	/// Catch the panic, log it, and keep flushing.
	#[default]
	Log,
	/// Re-raise the panic once the batch epoch has been restored.
	Panic,
}

/// Per-thread reactor settings.
///
/// ```toml
/// max-reaction-iterations = 100
/// reaction-error-handling = "log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReactorConfig {
	/// Flush passes allowed before the reaction graph is declared
	/// non-converging and the remaining queue is dropped.
	pub max_reaction_iterations: u32,
	pub reaction_error_handling: ReactionErrorHandling,
}

impl Default for ReactorConfig {
	fn default() -> Self {
		Self {
			max_reaction_iterations: 100,
			reaction_error_handling: ReactionErrorHandling::Log,
		}
	}
}

impl ReactorConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_reaction_iterations == 0 {
			return Err(ConfigError::Invalid(
				"max-reaction-iterations must be at least 1".to_owned(),
			));
		}
		Ok(())
	}
}

/// Errors that can occur when loading reactor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The document parsed but holds an unusable setting.
	#[error("invalid reactor config: {0}")]
	Invalid(String),
}
