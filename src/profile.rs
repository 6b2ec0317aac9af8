use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// GitHub avatar lookup (decorative only)
// ---------------------------------------------------------------------------

/// Shown whenever the profile lookup fails in any way.
pub const FALLBACK_AVATAR_URL: &str = "https://avatars.githubusercontent.com/u/9919?s=400";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT: &str = concat!("coffee-compass/", env!("CARGO_PKG_VERSION"));

fn client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .context("building HTTP client")
}

fn try_fetch_avatar_url(username: &str) -> Result<String> {
    let url = format!("https://api.github.com/users/{username}");
    let body: serde_json::Value = client()?
        .get(&url)
        .send()
        .context("requesting profile")?
        .error_for_status()
        .context("profile response status")?
        .json()
        .context("decoding profile JSON")?;
    body.get("avatar_url")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .context("profile has no avatar_url")
}

/// Resolve the avatar URL for a GitHub user. One attempt, bounded timeout;
/// any failure yields the fixed fallback URL and is never surfaced.
pub fn fetch_avatar_url(username: &str) -> String {
    match try_fetch_avatar_url(username) {
        Ok(url) => url,
        Err(e) => {
            log::debug!("avatar lookup for {username} failed: {e:#}");
            FALLBACK_AVATAR_URL.to_string()
        }
    }
}

fn try_fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let bytes = client()?
        .get(url)
        .send()
        .context("requesting avatar image")?
        .error_for_status()
        .context("avatar response status")?
        .bytes()
        .context("reading avatar body")?;
    Ok(bytes.to_vec())
}

/// Fetch the avatar image itself. `None` means the sidebar simply renders
/// without a picture.
pub fn fetch_avatar_bytes(username: &str) -> Option<Vec<u8>> {
    let url = fetch_avatar_url(username);
    match try_fetch_bytes(&url) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::debug!("avatar download failed: {e:#}");
            None
        }
    }
}

/// Run the avatar fetch once on a background thread so the first frame
/// never blocks on the network. The receiver is polled by the UI loop.
pub fn spawn_avatar_fetch(username: String) -> mpsc::Receiver<Option<Vec<u8>>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(fetch_avatar_bytes(&username));
    });
    rx
}
