use crate::config::toml_config::LauncherFile;
use crate::config::LauncherConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Flags are all optional. Anything not given falls back to the `--config`
/// file, then to the built-in defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "connect-devkit")]
#[command(about = "Start the Connect Agent API and React frontend for local development")]
pub struct LauncherArgs {
    #[arg(long, help = "TOML file with launcher settings")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Project checkout [default: .]")]
    pub project_root: Option<PathBuf>,

    #[arg(long, help = "Python interpreter for the API [default: venv/bin/python]")]
    pub python: Option<PathBuf>,

    #[arg(long, help = "Host the API binds to [default: 0.0.0.0]")]
    pub api_host: Option<String>,

    #[arg(long, help = "Port the API listens on [default: 8000]")]
    pub api_port: Option<u16>,

    #[arg(long, help = "Frontend directory [default: frontend]")]
    pub frontend_dir: Option<PathBuf>,

    #[arg(long, help = "Port the frontend dev server listens on [default: 3000]")]
    pub frontend_port: Option<u16>,

    #[arg(long, help = "Head start given to the API, in ms [default: 2000]")]
    pub startup_delay_ms: Option<u64>,

    #[arg(long, help = "Time each server gets to exit before it is killed, in ms [default: 5000]")]
    pub grace_period_ms: Option<u64>,

    #[arg(long, help = "Poll the API port instead of sleeping before starting the frontend")]
    pub wait_for_api: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl LauncherArgs {
    /// Resolve defaults, then the config file, then the flags.
    pub fn resolve(&self) -> Result<LauncherConfig> {
        let mut config = LauncherConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading launcher settings from {}", path.display());
            LauncherFile::from_file(path)?.apply_to(&mut config);
        }

        if let Some(root) = &self.project_root {
            config.project_root = root.clone();
        }
        if let Some(python) = &self.python {
            config.python = python.clone();
        }
        if let Some(host) = &self.api_host {
            config.api_host = host.clone();
        }
        if let Some(port) = self.api_port {
            config.api_port = port;
        }
        if let Some(dir) = &self.frontend_dir {
            config.frontend_dir = dir.clone();
        }
        if let Some(port) = self.frontend_port {
            config.frontend_port = port;
        }
        if let Some(ms) = self.startup_delay_ms {
            config.startup_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.grace_period_ms {
            config.grace_period = Duration::from_millis(ms);
        }
        config.wait_for_api |= self.wait_for_api;
        config.verbose = self.verbose;

        config.anchored()
    }
}
