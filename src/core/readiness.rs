use crate::domain::model::StartupGate;
use crate::utils::error::{DevkitError, Result};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{sleep, Instant};

/// Hold until the gate opens.
pub async fn pass(gate: &StartupGate) -> Result<()> {
    match gate {
        StartupGate::Delay(delay) => {
            tracing::debug!("Giving the API {:?} head start", delay);
            sleep(*delay).await;
            Ok(())
        }
        StartupGate::TcpProbe {
            address,
            interval,
            timeout,
        } => probe(address, *interval, *timeout).await,
    }
}

async fn probe(address: &str, interval: Duration, timeout: Duration) -> Result<()> {
    let started = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let remaining = timeout.saturating_sub(started.elapsed());
        match tokio::time::timeout(remaining, TcpStream::connect(address)).await {
            Ok(Ok(_)) => {
                tracing::info!(
                    "API accepting connections on {} after {:?} ({} attempts)",
                    address,
                    started.elapsed(),
                    attempts
                );
                return Ok(());
            }
            Ok(Err(e)) => tracing::debug!("Probe {} of {} failed: {}", attempts, address, e),
            Err(_) => tracing::debug!("Probe {} of {} hung, giving up", attempts, address),
        }

        if started.elapsed() + interval > timeout {
            return Err(DevkitError::ReadinessTimeout {
                address: address.to_string(),
                waited: started.elapsed(),
            });
        }
        sleep(interval).await;
    }
}
