//! Configuration file handling
//!
//! Every host path and collaborator command the harness touches is injected
//! through this layer rather than hard-coded, so sandboxed runs can point
//! the scenarios at a temporary tree and stub collaborators.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct HarnessConfig {
    /// Provisioning tool under test
    #[serde(default)]
    pub tool: ToolConfig,

    /// Host filesystem layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// External collaborator commands
    #[serde(default)]
    pub host: HostCommands,
}

/// The provisioning tool under test
#[derive(Debug, Deserialize)]
pub struct ToolConfig {
    /// Command used to invoke the tool
    #[serde(default = "default_tool_command")]
    pub command: String,

    /// Identity scope under which injected SSH keys are registered,
    /// passed as the tool's `--ssh-key-name` flag and used for bulk
    /// deregistration during cleanup
    #[serde(default = "default_key_scope")]
    pub key_scope: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            command: default_tool_command(),
            key_scope: default_key_scope(),
        }
    }
}

fn default_tool_command() -> String {
    "/usr/bin/coreos-cloudinit".to_string()
}

fn default_key_scope() -> String {
    "cloudinit-verify".to_string()
}

/// Host filesystem locations the scenarios write fixtures to and observe
/// artifacts at
#[derive(Debug, Deserialize)]
pub struct PathsConfig {
    /// Directory fixtures are materialized in
    #[serde(default = "default_fixture_dir")]
    pub fixture_dir: PathBuf,

    /// The provisioning tool's workspace directory
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// Discovery bootstrap file produced by the cloud-config scenario
    #[serde(default = "default_bootstrap_file")]
    pub bootstrap_file: PathBuf,

    /// Authorized-keys store injected keys land in
    #[serde(default = "default_authorized_keys")]
    pub authorized_keys: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            fixture_dir: default_fixture_dir(),
            workspace: default_workspace(),
            bootstrap_file: default_bootstrap_file(),
            authorized_keys: default_authorized_keys(),
        }
    }
}

fn default_fixture_dir() -> PathBuf {
    PathBuf::from("/tmp")
}

fn default_workspace() -> PathBuf {
    PathBuf::from("/var/lib/coreos-cloudinit")
}

fn default_bootstrap_file() -> PathBuf {
    PathBuf::from("/var/run/etcd/bootstrap.disco")
}

fn default_authorized_keys() -> PathBuf {
    PathBuf::from("/home/core/.ssh/authorized_keys")
}

/// External collaborator commands
#[derive(Debug, Deserialize)]
pub struct HostCommands {
    /// Command that deregisters injected keys by scope name
    #[serde(default = "default_ssh_key_tool")]
    pub ssh_key_tool: String,

    /// Service manager queried for unit status and used to stop units
    #[serde(default = "default_service_manager")]
    pub service_manager: String,
}

impl Default for HostCommands {
    fn default() -> Self {
        Self {
            ssh_key_tool: default_ssh_key_tool(),
            service_manager: default_service_manager(),
        }
    }
}

fn default_ssh_key_tool() -> String {
    "update-ssh-keys".to_string()
}

fn default_service_manager() -> String {
    "systemctl".to_string()
}

impl HarnessConfig {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Resolve the provisioning tool command to an invocable path
    pub fn tool_command(&self) -> Result<PathBuf> {
        resolve_command(&self.tool.command)
    }
}

/// Resolve a configured command name to an invocable path
///
/// Explicit paths are taken as-is; bare names are searched in PATH.
pub fn resolve_command(command: &str) -> Result<PathBuf> {
    if command.contains(std::path::MAIN_SEPARATOR) {
        return Ok(PathBuf::from(command));
    }
    which::which(command).map_err(|_| Error::CommandNotFound(command.to_string()))
}

/// Get the path to the configuration file
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/cloudinit-verify/config.toml`
/// - macOS: `~/Library/Application Support/cloudinit-verify/config.toml`
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "cloudinit-verify")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
