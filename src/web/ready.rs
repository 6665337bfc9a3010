use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::compose::Compose;
use crate::web::{Signal, WebError, POLL_INTERVAL, PROBE_TIMEOUT, UI_PORT, UI_SERVICE};

/// Opens a URL for the user. The one seam between the readiness pipeline and
/// the OS.
pub trait Browser: Send + Sync + 'static {
    fn open(&self, url: &str) -> anyhow::Result<()>;
}

/// The user's default browser.
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        open::that(url)?;
        Ok(())
    }
}

/// Compose reports the bind address (0.0.0.0), which is correct for binding
/// but useless as a connect target. Swap it for loopback; any other host
/// passes through untouched.
pub fn connect_address(address: &str) -> String {
    address.trim().replacen("0.0.0.0", "127.0.0.1", 1)
}

/// Ask compose for the published mapping of the UI port until it answers.
/// Unbounded on purpose: the orchestrator's timeout and the cancellation
/// token are the limits. Returns None when cancelled.
async fn wait_for_address<C: Compose>(compose: &C, cancel: &CancellationToken) -> Option<String> {
    loop {
        match compose.run(&["port", UI_SERVICE, UI_PORT]).await {
            Ok(out) => return Some(out),
            Err(e) => debug!(error = %e, "ui port not published yet"),
        }

        tokio::select! {
            _ = tokio::time::sleep(POLL_INTERVAL) => {}
            _ = cancel.cancelled() => return None,
        }
    }
}

/// The address discovery → HTTP probe → browser pipeline. Sends exactly one
/// signal on `tx` unless cancelled first. Any HTTP response counts as ready;
/// a reachable socket is all that matters, not the status code.
pub async fn open_when_ready<C, B>(
    compose: Arc<C>,
    browser: Arc<B>,
    known_address: Option<String>,
    tx: mpsc::Sender<Signal>,
    cancel: CancellationToken,
) where
    C: Compose,
    B: Browser,
{
    let address = match known_address {
        Some(addr) => addr,
        None => match wait_for_address(compose.as_ref(), &cancel).await {
            Some(addr) => addr,
            None => return,
        },
    };

    if address.trim().is_empty() {
        let _ = tx.try_send(Err(WebError::AddressNotFound {
            service: UI_SERVICE.to_string(),
        }));
        return;
    }

    let url = format!("http://{}", connect_address(&address));

    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(c) => c,
        Err(e) => {
            let _ = tx.try_send(Err(WebError::Probe(e)));
            return;
        }
    };

    loop {
        match client.get(&url).send().await {
            Ok(_) => break,
            Err(e) => debug!(url = %url, error = %e, "web interface not answering yet"),
        }

        tokio::select! {
            _ = tokio::time::sleep(POLL_INTERVAL) => {}
            _ = cancel.cancelled() => return,
        }
    }

    debug!(url = %url, "web interface answered, opening browser");
    let result = browser.open(&url).map_err(WebError::Browser);
    let _ = tx.try_send(result);
}
