#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::LauncherArgs;

use crate::core::launcher::{LaunchPlan, DEFAULT_GRACE_PERIOD, DEFAULT_STARTUP_DELAY};
use crate::domain::model::{ProcessSpec, StartupGate};
use crate::utils::error::{DevkitError, Result};
use crate::utils::validation::{
    validate_host, validate_non_empty_string, validate_path, validate_range, Validate,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_PROCESS_NAME: &str = "Agent API server";
pub const FRONTEND_PROCESS_NAME: &str = "React frontend";

/// Fully resolved launcher settings: CLI flags over the config file over
/// these defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct LauncherConfig {
    pub project_root: PathBuf,
    /// Interpreter for the API server. Relative paths are taken from `project_root`.
    pub python: PathBuf,
    pub api_script: String,
    pub api_host: String,
    pub api_port: u16,
    /// Relative paths are taken from `project_root`.
    pub frontend_dir: PathBuf,
    pub frontend_program: String,
    pub frontend_args: Vec<String>,
    /// Passed to the dev server as `PORT`.
    pub frontend_port: u16,
    pub startup_delay: Duration,
    pub grace_period: Duration,
    pub wait_for_api: bool,
    pub readiness_timeout: Duration,
    pub verbose: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            python: PathBuf::from("venv/bin/python"),
            api_script: "app/api.py".to_string(),
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
            frontend_dir: PathBuf::from("frontend"),
            frontend_program: "npm".to_string(),
            frontend_args: vec!["start".to_string()],
            frontend_port: 3000,
            startup_delay: DEFAULT_STARTUP_DELAY,
            grace_period: DEFAULT_GRACE_PERIOD,
            wait_for_api: false,
            readiness_timeout: Duration::from_secs(30),
            verbose: false,
        }
    }
}

impl LauncherConfig {
    pub fn api_url(&self) -> String {
        format!("http://localhost:{}", self.api_port)
    }

    pub fn frontend_url(&self) -> String {
        format!("http://localhost:{}", self.frontend_port)
    }

    /// Pin `project_root` to an absolute path. Children are started with the
    /// root as their working directory, so a relative root would otherwise
    /// be applied twice to the interpreter path.
    pub fn anchored(mut self) -> Result<Self> {
        self.project_root =
            std::path::absolute(&self.project_root).map_err(DevkitError::IoError)?;
        Ok(self)
    }

    /// Address to probe when waiting for the API. Wildcard binds are probed
    /// on loopback.
    pub fn probe_address(&self) -> String {
        let host = match self.api_host.as_str() {
            "0.0.0.0" => "127.0.0.1",
            "::" => "::1",
            other => other,
        };
        if host.contains(':') {
            format!("[{}]:{}", host, self.api_port)
        } else {
            format!("{}:{}", host, self.api_port)
        }
    }

    fn under_root(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    pub fn api_spec(&self) -> ProcessSpec {
        ProcessSpec::new(API_PROCESS_NAME, self.under_root(&self.python))
            .args([
                self.api_script.clone(),
                "--host".to_string(),
                self.api_host.clone(),
                "--port".to_string(),
                self.api_port.to_string(),
            ])
            .working_dir(&self.project_root)
    }

    pub fn frontend_spec(&self) -> ProcessSpec {
        ProcessSpec::new(FRONTEND_PROCESS_NAME, &self.frontend_program)
            .args(self.frontend_args.iter().cloned())
            .working_dir(self.under_root(&self.frontend_dir))
            // 不要自動開啟瀏覽器
            .env("BROWSER", "none")
            .env("PORT", self.frontend_port.to_string())
    }

    pub fn startup_gate(&self) -> StartupGate {
        if self.wait_for_api {
            StartupGate::TcpProbe {
                address: self.probe_address(),
                interval: Duration::from_millis(250),
                timeout: self.readiness_timeout,
            }
        } else {
            StartupGate::Delay(self.startup_delay)
        }
    }

    pub fn launch_plan(&self) -> LaunchPlan {
        LaunchPlan {
            api: self.api_spec(),
            frontend: self.frontend_spec(),
            gate: self.startup_gate(),
            grace_period: self.grace_period,
        }
    }
}

impl Validate for LauncherConfig {
    fn validate(&self) -> Result<()> {
        validate_path("project_root", &self.project_root)?;
        validate_path("python", &self.python)?;
        validate_non_empty_string("api_script", &self.api_script)?;
        validate_host("api_host", &self.api_host)?;
        validate_range("api_port", self.api_port, 1, u16::MAX)?;
        validate_range("frontend_port", self.frontend_port, 1, u16::MAX)?;
        if self.api_port == self.frontend_port {
            return Err(DevkitError::ConfigError {
                message: format!(
                    "API and frontend cannot both listen on port {}",
                    self.api_port
                ),
            });
        }
        validate_path("frontend_dir", &self.frontend_dir)?;
        validate_non_empty_string("frontend_program", &self.frontend_program)?;
        validate_range(
            "grace_period_ms",
            self.grace_period.as_millis(),
            1,
            600_000,
        )?;
        if self.wait_for_api {
            validate_range(
                "readiness_timeout_ms",
                self.readiness_timeout.as_millis(),
                1,
                600_000,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_command_line() {
        let config = LauncherConfig::default();
        let spec = config.api_spec();

        assert_eq!(spec.program, PathBuf::from("./venv/bin/python"));
        assert_eq!(
            spec.args,
            vec!["app/api.py", "--host", "0.0.0.0", "--port", "8000"]
        );
        assert_eq!(spec.working_dir, PathBuf::from("."));
        assert!(spec.env.is_empty());
    }

    #[test]
    fn test_default_frontend_command_line() {
        let config = LauncherConfig::default();
        let spec = config.frontend_spec();

        assert_eq!(spec.program, PathBuf::from("npm"));
        assert_eq!(spec.args, vec!["start"]);
        assert_eq!(spec.working_dir, PathBuf::from("./frontend"));
        assert_eq!(spec.env.get("BROWSER").map(String::as_str), Some("none"));
        assert_eq!(spec.env.get("PORT").map(String::as_str), Some("3000"));
    }

    #[test]
    fn test_frontend_port_drives_env_and_url() {
        let config = LauncherConfig {
            frontend_port: 3100,
            ..LauncherConfig::default()
        };
        assert_eq!(config.frontend_url(), "http://localhost:3100");
        assert_eq!(
            config.frontend_spec().env.get("PORT").map(String::as_str),
            Some("3100")
        );
    }

    #[test]
    fn test_anchored_root_is_not_applied_twice() {
        let config = LauncherConfig {
            project_root: PathBuf::from("checkout"),
            ..LauncherConfig::default()
        }
        .anchored()
        .unwrap();

        let spec = config.api_spec();
        assert!(config.project_root.is_absolute());
        assert_eq!(spec.working_dir, config.project_root);
        assert_eq!(spec.program, config.project_root.join("venv/bin/python"));
        assert!(spec.program.is_absolute());
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = LauncherConfig {
            project_root: PathBuf::from("/srv/connect"),
            python: PathBuf::from("/usr/bin/python3"),
            frontend_dir: PathBuf::from("/srv/web"),
            ..LauncherConfig::default()
        };

        assert_eq!(config.api_spec().program, PathBuf::from("/usr/bin/python3"));
        assert_eq!(config.api_spec().working_dir, PathBuf::from("/srv/connect"));
        assert_eq!(config.frontend_spec().working_dir, PathBuf::from("/srv/web"));
    }

    #[test]
    fn test_startup_gate_selection() {
        let mut config = LauncherConfig::default();
        assert_eq!(
            config.startup_gate(),
            StartupGate::Delay(Duration::from_secs(2))
        );

        config.wait_for_api = true;
        match config.startup_gate() {
            StartupGate::TcpProbe { address, .. } => assert_eq!(address, "127.0.0.1:8000"),
            other => panic!("unexpected gate {:?}", other),
        }
    }

    #[test]
    fn test_probe_address_ipv6() {
        let config = LauncherConfig {
            api_host: "::".to_string(),
            ..LauncherConfig::default()
        };
        assert_eq!(config.probe_address(), "[::1]:8000");
    }

    #[test]
    fn test_validation() {
        assert!(LauncherConfig::default().validate().is_ok());

        let bad_port = LauncherConfig {
            api_port: 0,
            ..LauncherConfig::default()
        };
        assert!(bad_port.validate().is_err());

        let shared_port = LauncherConfig {
            frontend_port: 8000,
            ..LauncherConfig::default()
        };
        assert!(matches!(
            shared_port.validate(),
            Err(DevkitError::ConfigError { .. })
        ));

        let bad_host = LauncherConfig {
            api_host: "not a host".to_string(),
            ..LauncherConfig::default()
        };
        assert!(bad_host.validate().is_err());
    }
}
