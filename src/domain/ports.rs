use crate::domain::model::{ExitSummary, InvocationContext, ProcessSpec, ResponseEnvelope};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A serverless request handler. The request and context are accepted to
/// match the host's calling convention; implementations may ignore both.
pub trait Responder: Send + Sync {
    fn respond(&self, request: &serde_json::Value, context: &InvocationContext) -> ResponseEnvelope;
}

/// Handle to a spawned child process, exclusively owned by the launcher.
#[async_trait]
pub trait ManagedProcess: Send {
    fn name(&self) -> &str;

    fn id(&self) -> Option<u32>;

    /// Block until the child exits and reap it.
    async fn wait(&mut self) -> Result<ExitSummary>;

    /// Non-blocking exit check; reaps the child if it has exited.
    fn try_wait(&mut self) -> Result<Option<ExitSummary>>;

    /// Ask the child to shut down gracefully (SIGTERM on Unix).
    fn terminate(&mut self) -> Result<()>;

    /// Forcibly kill the child without waiting for it.
    fn start_kill(&mut self) -> Result<()>;
}

pub trait ProcessSpawner: Send + Sync {
    fn spawn(&self, spec: &ProcessSpec) -> Result<Box<dyn ManagedProcess>>;
}
