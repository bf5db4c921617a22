//! The browser-session driver boundary and its process-spawning backend.
//!
//! The core never touches browser internals: it hands a fully resolved
//! [`LaunchSpec`] to a [`SessionDriver`] and tracks the opaque handle it
//! gets back. [`ProcessDriver`] is the default backend, spawning the Edge
//! binary directly against the requested profile directory.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

/// Failure reported by a driver backend.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DriverError(String);

impl DriverError {
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

/// Fully resolved launch request, handed to the driver verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
	/// Root directory holding all profile directories.
	pub user_data_dir: PathBuf,
	/// Profile-directory selector ("Profile 3").
	pub profile_directory: String,
	/// Locale forced via `--lang` when set.
	pub locale: Option<String>,
	/// Stability switches appended as-is.
	pub extra_args: Vec<String>,
}

impl LaunchSpec {
	/// Renders the browser command line.
	pub fn to_args(&self) -> Vec<String> {
		let mut args = vec![
			format!("--user-data-dir={}", self.user_data_dir.display()),
			format!("--profile-directory={}", self.profile_directory),
		];
		if let Some(locale) = &self.locale {
			args.push(format!("--lang={locale}"));
		}
		args.extend(self.extra_args.iter().cloned());
		args
	}
}

/// External collaborator owning the actual browser-session mechanics.
pub trait SessionDriver {
	/// Opaque live-session handle tracked by the coordinator.
	type Session;

	fn launch(&self, spec: &LaunchSpec) -> std::result::Result<Self::Session, DriverError>;

	/// Takes the handle by `&mut` so a failed close leaves the session
	/// tracked on the caller's side.
	fn close(&self, session: &mut Self::Session) -> std::result::Result<(), DriverError>;
}

/// Binary names probed on PATH, most common first.
const BINARY_CANDIDATES: &[&str] = &[
	"msedge",
	"microsoft-edge",
	"microsoft-edge-stable",
	"microsoft-edge-beta",
	"microsoft-edge-dev",
];

/// Driver that spawns the browser as a detached child process.
#[derive(Debug, Clone)]
pub struct ProcessDriver {
	binary: PathBuf,
}

impl ProcessDriver {
	/// Uses an explicit browser binary, skipping discovery.
	pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
		Self { binary: binary.into() }
	}

	/// Probes PATH and the platform install locations for an Edge binary.
	pub fn discover() -> std::result::Result<Self, DriverError> {
		for candidate in BINARY_CANDIDATES {
			if let Ok(path) = which::which(candidate) {
				debug!(target: "edgectl.driver", binary = %path.display(), "found browser binary");
				return Ok(Self { binary: path });
			}
		}
		for fallback in install_fallbacks() {
			if fallback.exists() {
				debug!(target: "edgectl.driver", binary = %fallback.display(), "found browser binary");
				return Ok(Self { binary: fallback });
			}
		}
		Err(DriverError::new(
			"no Microsoft Edge binary found; install Edge or pass an explicit binary",
		))
	}

	pub fn binary(&self) -> &Path {
		&self.binary
	}
}

#[cfg(target_os = "windows")]
fn install_fallbacks() -> Vec<PathBuf> {
	vec![
		PathBuf::from(r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe"),
		PathBuf::from(r"C:\Program Files\Microsoft\Edge\Application\msedge.exe"),
	]
}

#[cfg(target_os = "macos")]
fn install_fallbacks() -> Vec<PathBuf> {
	vec![PathBuf::from(
		"/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
	)]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn install_fallbacks() -> Vec<PathBuf> {
	vec![PathBuf::from("/opt/microsoft/msedge/msedge")]
}

/// A spawned browser process.
#[derive(Debug)]
pub struct BrowserProcess {
	child: Child,
}

impl BrowserProcess {
	pub fn pid(&self) -> u32 {
		self.child.id()
	}
}

impl SessionDriver for ProcessDriver {
	type Session = BrowserProcess;

	fn launch(&self, spec: &LaunchSpec) -> std::result::Result<BrowserProcess, DriverError> {
		let child = Command::new(&self.binary)
			.args(spec.to_args())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.spawn()
			.map_err(|err| DriverError::new(format!("failed to spawn {}: {err}", self.binary.display())))?;
		info!(target: "edgectl.driver", pid = child.id(), profile_dir = %spec.profile_directory, "browser process launched");
		Ok(BrowserProcess { child })
	}

	fn close(&self, session: &mut BrowserProcess) -> std::result::Result<(), DriverError> {
		session
			.child
			.kill()
			.map_err(|err| DriverError::new(format!("kill failed: {err}")))?;
		session
			.child
			.wait()
			.map_err(|err| DriverError::new(format!("wait failed: {err}")))?;
		Ok(())
	}
}

/// Platform default for Edge's "User Data" root.
pub fn default_user_data_dir() -> PathBuf {
	#[cfg(target_os = "windows")]
	{
		dirs::data_local_dir()
			.map(|dir| dir.join("Microsoft").join("Edge").join("User Data"))
			.unwrap_or_else(|| PathBuf::from("."))
	}
	#[cfg(target_os = "macos")]
	{
		dirs::config_dir()
			.map(|dir| dir.join("Microsoft Edge"))
			.unwrap_or_else(|| PathBuf::from("."))
	}
	#[cfg(all(unix, not(target_os = "macos")))]
	{
		dirs::config_dir()
			.map(|dir| dir.join("microsoft-edge"))
			.unwrap_or_else(|| PathBuf::from("."))
	}
}
