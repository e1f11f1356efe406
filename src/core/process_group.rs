use crate::domain::model::{CleanupAction, CleanupRecord, ExitSummary};
use crate::domain::ports::ManagedProcess;
use crate::utils::error::Result;
use std::time::Duration;
use tokio::time::timeout;

/// Owns every child the launcher has started.
///
/// `shutdown` is the release action for the whole group: each child is asked
/// to terminate, given `grace_period` to exit, then killed. If the group is
/// dropped without `shutdown` (a panic unwinding through the launcher), the
/// remaining children are killed synchronously instead.
pub struct ProcessGroup {
    children: Vec<Box<dyn ManagedProcess>>,
    grace_period: Duration,
}

impl ProcessGroup {
    pub fn new(grace_period: Duration) -> Self {
        Self {
            children: Vec::new(),
            grace_period,
        }
    }

    pub fn adopt(&mut self, child: Box<dyn ManagedProcess>) {
        tracing::debug!("Tracking {} (pid {:?})", child.name(), child.id());
        self.children.push(child);
    }

    pub(crate) fn len(&self) -> usize {
        self.children.len()
    }

    pub fn names(&self) -> Vec<String> {
        self.children.iter().map(|c| c.name().to_string()).collect()
    }

    /// Wait for the child at `index` (spawn order) to exit.
    pub async fn wait_at(&mut self, index: usize) -> Result<(String, ExitSummary)> {
        let child = &mut self.children[index];
        let status = child.wait().await?;
        Ok((child.name().to_string(), status))
    }

    /// Release every child, in spawn order. Never fails; each child is
    /// released exactly once because the group is drained.
    pub async fn shutdown(&mut self) -> Vec<CleanupRecord> {
        let mut records = Vec::with_capacity(self.children.len());
        for mut child in self.children.drain(..) {
            let action = release(child.as_mut(), self.grace_period).await;
            tracing::info!("Cleaned up {}: {:?}", child.name(), action);
            records.push(CleanupRecord {
                name: child.name().to_string(),
                action,
            });
        }
        records
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        for child in &mut self.children {
            if let Err(e) = child.start_kill() {
                tracing::warn!("Failed to kill {} on drop: {}", child.name(), e);
            }
        }
    }
}

async fn release(child: &mut dyn ManagedProcess, grace_period: Duration) -> CleanupAction {
    match child.try_wait() {
        Ok(Some(status)) => {
            tracing::debug!("{} already exited ({})", child.name(), status);
            return CleanupAction::AlreadyExited;
        }
        Ok(None) => {}
        Err(e) => tracing::debug!("Could not poll {}: {}", child.name(), e),
    }

    match child.terminate() {
        Ok(()) => match timeout(grace_period, child.wait()).await {
            Ok(Ok(status)) => {
                tracing::debug!("{} stopped ({})", child.name(), status);
                return CleanupAction::Terminated;
            }
            Ok(Err(e)) => tracing::warn!("Waiting on {} failed: {}", child.name(), e),
            Err(_) => tracing::warn!(
                "{} still running after {:?}, killing it",
                child.name(),
                grace_period
            ),
        },
        Err(e) => tracing::warn!("Terminate request to {} failed: {}", child.name(), e),
    }

    if let Err(e) = child.start_kill() {
        tracing::warn!("Kill of {} failed: {}", child.name(), e);
        return CleanupAction::Abandoned;
    }
    // reap; a killed child that still will not report back is left to the OS
    if timeout(grace_period, child.wait()).await.is_err() {
        tracing::warn!("{} did not report exit after kill", child.name());
    }
    CleanupAction::Killed
}
