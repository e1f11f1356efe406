use crate::core::process_group::ProcessGroup;
use crate::core::readiness;
use crate::domain::model::{CleanupAction, CleanupRecord, LauncherState, ProcessSpec, StartupGate};
use crate::domain::ports::ProcessSpawner;
use crate::utils::error::DevkitError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// The two children and the timing between them.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub api: ProcessSpec,
    pub frontend: ProcessSpec,
    pub gate: StartupGate,
    pub grace_period: Duration,
}

#[derive(Debug)]
pub enum LaunchOutcome {
    BothExited,
    Interrupted,
    Errored(DevkitError),
}

#[derive(Debug)]
pub struct LaunchReport {
    pub outcome: LaunchOutcome,
    pub states: Vec<LauncherState>,
    pub cleanup: Vec<CleanupRecord>,
}

impl LaunchReport {
    pub fn final_state(&self) -> LauncherState {
        self.states.last().copied().unwrap_or(LauncherState::Idle)
    }

    pub fn forced_kills(&self) -> usize {
        self.cleanup
            .iter()
            .filter(|r| matches!(r.action, CleanupAction::Killed | CleanupAction::Abandoned))
            .count()
    }

    pub fn error(&self) -> Option<&DevkitError> {
        match &self.outcome {
            LaunchOutcome::Errored(e) => Some(e),
            _ => None,
        }
    }
}

pub struct DevLauncher<S: ProcessSpawner> {
    spawner: S,
    plan: LaunchPlan,
}

impl<S: ProcessSpawner> DevLauncher<S> {
    pub fn new(spawner: S, plan: LaunchPlan) -> Self {
        Self { spawner, plan }
    }

    /// Start the API, then the frontend, and wait for both.
    ///
    /// `interrupt` resolving while the launcher is blocked (startup gate or
    /// join-wait) stops the run. Whatever happens, every child that was
    /// started is cleaned up before this returns, and the report always ends
    /// in `STOPPED`.
    pub async fn run<F>(&self, interrupt: F) -> LaunchReport
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(interrupt);

        let mut states = vec![LauncherState::Idle];
        let mut group = ProcessGroup::new(self.plan.grace_period);

        let outcome = self
            .start_and_wait(&mut group, &mut states, interrupt.as_mut())
            .await;

        match &outcome {
            LaunchOutcome::BothExited => {
                tracing::info!("Both servers exited");
                states.push(LauncherState::BothExited);
            }
            LaunchOutcome::Interrupted => {
                println!("\n🛑 Stopping servers...");
                states.push(LauncherState::Interrupted);
            }
            LaunchOutcome::Errored(e) => {
                tracing::error!("❌ Error starting servers: {} (Category: {:?})", e, e.category());
                eprintln!("❌ {}", e.user_friendly_message());
                states.push(LauncherState::Errored);
            }
        }

        states.push(LauncherState::CleaningUp);
        tracing::debug!("Cleaning up {:?}", group.names());
        let cleanup = group.shutdown().await;
        states.push(LauncherState::Stopped);

        println!("✅ All servers stopped.");
        tracing::debug!(
            "Launcher states: {}",
            states.iter().map(ToString::to_string).collect::<Vec<_>>().join(" → ")
        );

        LaunchReport {
            outcome,
            states,
            cleanup,
        }
    }

    async fn start_and_wait<F>(
        &self,
        group: &mut ProcessGroup,
        states: &mut Vec<LauncherState>,
        mut interrupt: Pin<&mut F>,
    ) -> LaunchOutcome
    where
        F: Future<Output = ()>,
    {
        println!("🚀 Starting {}...", self.plan.api.name);
        match self.spawner.spawn(&self.plan.api) {
            Ok(child) => group.adopt(child),
            Err(e) => return LaunchOutcome::Errored(e),
        }
        states.push(LauncherState::ApiSpawned);

        tokio::select! {
            gate = readiness::pass(&self.plan.gate) => {
                if let Err(e) = gate {
                    return LaunchOutcome::Errored(e);
                }
            }
            () = &mut interrupt => return LaunchOutcome::Interrupted,
        }

        println!("🚀 Starting {}...", self.plan.frontend.name);
        match self.spawner.spawn(&self.plan.frontend) {
            Ok(child) => group.adopt(child),
            Err(e) => return LaunchOutcome::Errored(e),
        }
        states.push(LauncherState::FrontendSpawned);

        println!("\n✅ Both servers starting...\n");
        states.push(LauncherState::Waiting);

        for index in 0..group.len() {
            tokio::select! {
                exited = group.wait_at(index) => match exited {
                    Ok((name, status)) => tracing::info!("{} exited ({})", name, status),
                    Err(e) => return LaunchOutcome::Errored(e),
                },
                () = &mut interrupt => return LaunchOutcome::Interrupted,
            }
        }

        LaunchOutcome::BothExited
    }
}
