// Operator interrupt handling.
//
// - SIGINT  (Ctrl+C): stop both servers
// - SIGTERM (Unix):   same, so `kill <pid>` behaves like Ctrl+C
//
// Handlers are registered in `Interrupts::install`, before any child is
// spawned; a signal that arrives before `recv` is polled is still seen.

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

pub struct Interrupts {
    #[cfg(unix)]
    sigint: Option<Signal>,
    #[cfg(unix)]
    sigterm: Option<Signal>,
}

impl Interrupts {
    /// Register the handlers now. Must be called inside the runtime.
    #[cfg(unix)]
    pub fn install() -> Self {
        Self {
            sigint: register(SignalKind::interrupt(), "SIGINT"),
            sigterm: register(SignalKind::terminate(), "SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    pub fn install() -> Self {
        Self {}
    }

    /// Resolves on the first interrupt. With no handler registered it never
    /// resolves and the launcher simply waits for its children.
    #[cfg(unix)]
    pub async fn recv(mut self) {
        tokio::select! {
            () = next(self.sigint.as_mut()) => tracing::debug!("SIGINT received"),
            () = next(self.sigterm.as_mut()) => tracing::debug!("SIGTERM received"),
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::debug!("Ctrl+C received"),
            Err(e) => {
                tracing::warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await
            }
        }
    }
}

#[cfg(unix)]
fn register(kind: SignalKind, label: &str) -> Option<Signal> {
    match signal(kind) {
        Ok(stream) => Some(stream),
        Err(e) => {
            tracing::warn!("Failed to register {} handler: {}", label, e);
            None
        }
    }
}

#[cfg(unix)]
async fn next(stream: Option<&mut Signal>) {
    match stream {
        Some(stream) => {
            if stream.recv().await.is_none() {
                std::future::pending::<()>().await
            }
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use nix::sys::signal::{kill, Signal as NixSignal};
    use nix::unistd::getpid;
    use std::time::Duration;

    #[tokio::test]
    async fn test_signal_before_recv_is_not_lost() {
        let interrupts = Interrupts::install();

        // delivered before anything polls `recv`
        kill(getpid(), NixSignal::SIGTERM).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        tokio::time::timeout(Duration::from_secs(2), interrupts.recv())
            .await
            .expect("SIGTERM was caught by the registered handler");
    }
}
