use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::compose::status::{extract_states, ServiceState};
use crate::compose::Compose;
use crate::web::{Signal, WebError, POLL_INTERVAL};

/// Which services are batch-style workers: expected to run to completion and
/// exit 0 rather than stay up. Everything else is expected to run
/// continuously, so any exit is abnormal.
#[derive(Debug, Clone)]
pub struct MonitorPolicy {
    batch_services: Vec<String>,
}

impl Default for MonitorPolicy {
    fn default() -> Self {
        Self {
            batch_services: vec!["gitcollector".to_string(), "ghsync".to_string()],
        }
    }
}

impl MonitorPolicy {
    /// Default allow-list, extended with the comma-separated
    /// STACKRIG_BATCH_SERVICES environment variable so new deployments can
    /// add batch workers without a code change.
    pub fn from_env() -> Self {
        Self::with_extra(std::env::var("STACKRIG_BATCH_SERVICES").ok().as_deref())
    }

    /// Default allow-list plus a comma-separated list of extra batch
    /// services. Blank entries and duplicates are dropped.
    pub fn with_extra(extra: Option<&str>) -> Self {
        let mut policy = Self::default();
        for name in extra
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            if !policy.batch_services.iter().any(|s| s == name) {
                policy.batch_services.push(name.to_string());
            }
        }
        policy
    }

    pub fn is_batch(&self, service: &str) -> bool {
        self.batch_services.iter().any(|s| s == service)
    }

    /// Judge one observed state: Ok keeps the monitor polling, Err is a
    /// terminal signal for the whole wait.
    pub fn judge(&self, service: &str, state: &ServiceState) -> Result<(), WebError> {
        match state {
            ServiceState::Up => Ok(()),
            ServiceState::Exited(0) if self.is_batch(service) => Ok(()),
            ServiceState::Exited(code) => Err(WebError::ServiceUnhealthy {
                service: service.to_string(),
                state: format!("Exit {code}"),
            }),
            ServiceState::Other(raw) => Err(WebError::ServiceUnhealthy {
                service: service.to_string(),
                state: raw.clone(),
            }),
        }
    }
}

/// Poll one service's status at the fixed interval until it enters a
/// terminal state, the status query itself fails, or the token is cancelled.
pub async fn monitor_service<C: Compose>(
    compose: Arc<C>,
    service: String,
    policy: MonitorPolicy,
    tx: mpsc::Sender<Signal>,
    cancel: CancellationToken,
) {
    loop {
        let output = match compose.run(&["ps", &service]).await {
            Ok(out) => out,
            Err(e) => {
                let _ = tx.try_send(Err(WebError::Status {
                    service: service.clone(),
                    source: e,
                }));
                return;
            }
        };

        for state in extract_states(&output) {
            if let Err(err) = policy.judge(&service, &state) {
                debug!(service = %service, ?state, "service entered a terminal state");
                let _ = tx.try_send(Err(err));
                return;
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(POLL_INTERVAL) => {}
            _ = cancel.cancelled() => {
                debug!(service = %service, "monitor cancelled");
                return;
            }
        }
    }
}

/// Query the service list once, then spawn one monitor per service. A
/// discovery failure is itself a terminal signal; no monitors are spawned in
/// that case.
pub fn spawn_monitors<C: Compose>(
    compose: Arc<C>,
    policy: MonitorPolicy,
    tx: mpsc::Sender<Signal>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        let listing = match compose.run(&["config", "--services"]).await {
            Ok(out) => out,
            Err(e) => {
                let _ = tx.try_send(Err(WebError::Discovery(e)));
                return;
            }
        };

        for service in listing.lines().map(str::trim).filter(|s| !s.is_empty()) {
            debug!(service = %service, "starting service monitor");
            tokio::spawn(monitor_service(
                Arc::clone(&compose),
                service.to_string(),
                policy.clone(),
                tx.clone(),
                cancel.clone(),
            ));
        }
    });
}
