use crate::domain::model::{ExitSummary, ProcessSpec};
use crate::domain::ports::{ManagedProcess, ProcessSpawner};
use crate::utils::error::{DevkitError, Result};
use async_trait::async_trait;
use tokio::process::{Child, Command};

/// Spawns real OS processes through `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl ProcessSpawner for TokioSpawner {
    fn spawn(&self, spec: &ProcessSpec) -> Result<Box<dyn ManagedProcess>> {
        tracing::debug!(
            "Spawning {}: {} (cwd {})",
            spec.name,
            spec.command_line(),
            spec.working_dir.display()
        );

        let child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .envs(&spec.env)
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DevkitError::SpawnError {
                name: spec.name.clone(),
                source,
            })?;

        tracing::info!("{} started (pid {:?})", spec.name, child.id());
        Ok(Box::new(TokioProcess {
            name: spec.name.clone(),
            child,
        }))
    }
}

pub struct TokioProcess {
    name: String,
    child: Child,
}

impl TokioProcess {
    fn process_error(&self, source: std::io::Error) -> DevkitError {
        DevkitError::ProcessError {
            name: self.name.clone(),
            source,
        }
    }
}

#[async_trait]
impl ManagedProcess for TokioProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    async fn wait(&mut self) -> Result<ExitSummary> {
        match self.child.wait().await {
            Ok(status) => Ok(status.into()),
            Err(e) => Err(self.process_error(e)),
        }
    }

    fn try_wait(&mut self) -> Result<Option<ExitSummary>> {
        match self.child.try_wait() {
            Ok(status) => Ok(status.map(Into::into)),
            Err(e) => Err(self.process_error(e)),
        }
    }

    #[cfg(unix)]
    fn terminate(&mut self) -> Result<()> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        // no pid means the child has already been reaped
        let Some(pid) = self.child.id() else {
            return Ok(());
        };
        let pid = i32::try_from(pid).map_err(|e| DevkitError::SignalError {
            name: self.name.clone(),
            message: e.to_string(),
        })?;

        kill(Pid::from_raw(pid), Signal::SIGTERM).map_err(|errno| DevkitError::SignalError {
            name: self.name.clone(),
            message: errno.to_string(),
        })
    }

    #[cfg(not(unix))]
    fn terminate(&mut self) -> Result<()> {
        self.start_kill()
    }

    fn start_kill(&mut self) -> Result<()> {
        match self.child.start_kill() {
            Ok(()) => Ok(()),
            Err(e) => Err(self.process_error(e)),
        }
    }
}
