use thiserror::Error;

#[derive(Debug, Error)]
pub enum JellyError {
	#[error("unknown tunable `{0}`, expected `gravity` or `speed`")]
	UnknownTunable(String),
	#[error("invalid config: {0}")]
	InvalidConfig(String),
	#[error("invalid body shape: {0}")]
	InvalidShape(String),
	#[error("no such point: body {body}, index {index}")]
	NoSuchPoint { body: usize, index: usize },
	#[error("config io: {0}")]
	Io(#[from] std::io::Error),
	#[error("config parse: {0}")]
	Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, JellyError>;
