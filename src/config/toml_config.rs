use crate::config::LauncherConfig;
use crate::utils::error::{DevkitError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// Optional launcher settings file. Every key may be omitted.
///
/// ```toml
/// [project]
/// root = "${HOME}/Code/Connect"
/// python = "venv/bin/python"
///
/// [api]
/// host = "0.0.0.0"
/// port = 8000
///
/// [frontend]
/// dir = "frontend"
/// port = 3000
///
/// [timing]
/// startup_delay_ms = 2000
/// grace_period_ms = 5000
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherFile {
    pub project: Option<ProjectSection>,
    pub api: Option<ApiSection>,
    pub frontend: Option<FrontendSection>,
    pub timing: Option<TimingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    pub root: Option<PathBuf>,
    pub python: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub script: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontendSection {
    pub dir: Option<PathBuf>,
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingSection {
    pub startup_delay_ms: Option<u64>,
    pub grace_period_ms: Option<u64>,
    pub wait_for_api: Option<bool>,
    pub readiness_timeout_ms: Option<u64>,
}

impl LauncherFile {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Reading {}", path.as_ref().display());
        let content = std::fs::read_to_string(&path).map_err(DevkitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DevkitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Overlay the values present in this file onto `config`.
    pub fn apply_to(&self, config: &mut LauncherConfig) {
        if let Some(project) = &self.project {
            if let Some(root) = &project.root {
                config.project_root = root.clone();
            }
            if let Some(python) = &project.python {
                config.python = python.clone();
            }
        }

        if let Some(api) = &self.api {
            if let Some(script) = &api.script {
                config.api_script = script.clone();
            }
            if let Some(host) = &api.host {
                config.api_host = host.clone();
            }
            if let Some(port) = api.port {
                config.api_port = port;
            }
        }

        if let Some(frontend) = &self.frontend {
            if let Some(dir) = &frontend.dir {
                config.frontend_dir = dir.clone();
            }
            if let Some(program) = &frontend.program {
                config.frontend_program = program.clone();
            }
            if let Some(args) = &frontend.args {
                config.frontend_args = args.clone();
            }
            if let Some(port) = frontend.port {
                config.frontend_port = port;
            }
        }

        if let Some(timing) = &self.timing {
            if let Some(ms) = timing.startup_delay_ms {
                config.startup_delay = Duration::from_millis(ms);
            }
            if let Some(ms) = timing.grace_period_ms {
                config.grace_period = Duration::from_millis(ms);
            }
            if let Some(wait) = timing.wait_for_api {
                config.wait_for_api = wait;
            }
            if let Some(ms) = timing.readiness_timeout_ms {
                config.readiness_timeout = Duration::from_millis(ms);
            }
        }
    }
}

/// 替換環境變數 (例如 ${HOME})；未定義的變數保持原樣
fn substitute_env_vars(content: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
    });

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}
