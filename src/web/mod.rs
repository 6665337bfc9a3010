pub mod monitor;
pub mod progress;
pub mod ready;

use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::compose::{Compose, ComposeError};
use crate::web::monitor::MonitorPolicy;
use crate::web::progress::Spinner;
use crate::web::ready::Browser;

/// Compose service that serves the web interface.
pub const UI_SERVICE: &str = "web-ui";
/// Port the UI listens on inside its container.
pub const UI_PORT: &str = "8088";
/// Fixed interval between polls, shared by the service monitors and the
/// readiness pipeline.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Client-side timeout for a single HTTP probe.
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(1);
/// Below this overall timeout the spinner is not worth the flicker.
const SPINNER_THRESHOLD: Duration = Duration::from_secs(5);

// Far more slots than concurrent senders, each of which sends at most one
// message. try_send on this channel never meets a full buffer, so a monitor
// can never be left blocked after the receiver has returned.
const SIGNAL_CAPACITY: usize = 64;

/// A message on the shared completion channel: the first one received decides
/// the outcome of the whole wait.
pub type Signal = Result<(), WebError>;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("cannot use the compose working directory")]
    Environment(#[source] ComposeError),

    #[error("service '{service}' is in state '{state}'")]
    ServiceUnhealthy { service: String, state: String },

    #[error("cannot get status of service '{service}'")]
    Status {
        service: String,
        #[source]
        source: ComposeError,
    },

    #[error("cannot get the list of services")]
    Discovery(#[source] ComposeError),

    #[error("could not find the public port of {service}")]
    AddressNotFound { service: String },

    #[error("could not probe the web interface")]
    Probe(#[source] reqwest::Error),

    #[error("could not open the browser")]
    Browser(#[source] anyhow::Error),

    #[error("the {service} container is not running after {timeout:?}")]
    Timeout { service: String, timeout: Duration },
}

/// Wait for the stack to become healthy and open the web interface.
///
/// Runs a fail-fast check of the environment first, then races one monitor
/// per discovered service and the address/readiness/browser pipeline against
/// `timeout`, all reporting into one channel. The first terminal signal wins;
/// every poller is cancelled when this returns and winds down at its next
/// poll boundary (this function does not wait for that).
pub async fn open_ui<C, B>(
    compose: Arc<C>,
    browser: Arc<B>,
    timeout: Duration,
) -> Result<(), WebError>
where
    C: Compose,
    B: Browser,
{
    // One synchronous port query up front. A recognized environment error
    // means the workdir itself is unusable and no amount of waiting will fix
    // it. Any other failure just means the container is not up yet.
    let known_address = match compose.run(&["port", UI_SERVICE, UI_PORT]).await {
        Ok(out) => Some(out),
        Err(ComposeError::Workdir(e)) => return Err(WebError::Environment(e.into())),
        Err(e) => {
            debug!(error = %e, "ui port not published yet, will keep polling");
            None
        }
    };

    print_banner();

    let (tx, mut rx) = mpsc::channel::<Signal>(SIGNAL_CAPACITY);
    let cancel = CancellationToken::new();

    monitor::spawn_monitors(
        Arc::clone(&compose),
        MonitorPolicy::from_env(),
        tx.clone(),
        cancel.clone(),
    );
    tokio::spawn(ready::open_when_ready(
        compose,
        browser,
        known_address,
        tx,
        cancel.clone(),
    ));

    let spinner =
        (timeout > SPINNER_THRESHOLD).then(|| Spinner::start("Initializing the stack..."));

    let result = tokio::select! {
        Some(signal) = rx.recv() => signal,
        _ = tokio::time::sleep(timeout) => Err(WebError::Timeout {
            service: UI_SERVICE.to_string(),
            timeout,
        }),
    };

    cancel.cancel();
    if let Some(spinner) = spinner {
        spinner.finish();
    }
    result
}

fn print_banner() {
    println!();
    println!("Once the stack is fully initialized, the web interface will be available at:");
    println!("  {}", format!("http://127.0.0.1:{UI_PORT}").bold());
    println!("  user: admin");
    println!("  pass: admin");
    println!();
}
