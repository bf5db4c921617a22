use thiserror::Error;

use crate::driver::DriverError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by registry, store, and launch operations.
#[derive(Debug, Error)]
pub enum Error {
	#[error("profile '{0}' already exists")]
	AlreadyExists(String),

	#[error("profile '{0}' is not registered")]
	ProfileNotFound(String),

	#[error("no batch named '{0}'")]
	BatchNotFound(String),

	/// Driver-level launch failure for a single profile. Multi-profile
	/// flows catch this and classify it instead of propagating.
	#[error("failed to launch profile '{profile}': {message}")]
	LaunchFailed { profile: String, message: String },

	/// Driver-level close failure. Never fatal; the coordinator logs it
	/// and keeps the session tracked.
	#[error("failed to close profile '{profile}': {message}")]
	CloseFailed { profile: String, message: String },

	#[error(transparent)]
	Driver(#[from] DriverError),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}
