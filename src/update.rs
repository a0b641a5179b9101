//! Background check for a newer release.
//!
//! Runs on its own thread and only ever logs. Resolution never waits on it.

use log::{debug, info};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

/// Plain-text file holding the latest released version.
pub const DEFAULT_RELEASE_FEED: &str = "https://brianferguson.github.io/SysColor.dll/version";

const USER_AGENT: &str = concat!("syscolor/", env!("CARGO_PKG_VERSION"));

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Feeds longer than this are not version strings.
const MAX_FEED_LEN: usize = 15;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Failed to fetch release feed: {0}")]
    Fetch(String),

    #[error("Failed to read release feed: {0}")]
    Read(#[from] std::io::Error),
}

/// Source of the latest published version string.
pub trait ReleaseFeed: Send + 'static {
    fn latest(&self) -> Result<String, UpdateError>;
}

/// Release feed fetched over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFeed {
    url: String,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for HttpFeed {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_FEED)
    }
}

impl ReleaseFeed for HttpFeed {
    fn latest(&self) -> Result<String, UpdateError> {
        let response = ureq::get(&self.url)
            .set("User-Agent", USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .call()
            .map_err(|e| UpdateError::Fetch(e.to_string()))?;

        Ok(response.into_string()?)
    }
}

/// Leading decimal digits of `text` after optional whitespace; 0 if none.
fn leading_number(text: &str) -> u32 {
    text.trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .fold(0u32, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(digit.to_digit(10).unwrap_or(0))
        })
}

/// Packs `MAJOR.MINOR.PATCH` as `major * 1_000_000 + minor * 1_000 + patch`.
///
/// Missing parts count as zero and each part only reads its leading digits,
/// so `"2.1"` is `2_001_000` and `"2.1.3-beta"` is `2_001_003`.
pub fn parse_version(text: &str) -> u32 {
    let mut parts = text.splitn(3, '.');
    let mut next = || parts.next().map(leading_number).unwrap_or(0);

    let major = next();
    let minor = next();
    let patch = next();

    major
        .saturating_mul(1_000_000)
        .saturating_add(minor.saturating_mul(1_000))
        .saturating_add(patch)
}

/// Returns the published version if it is newer than `installed`.
pub fn newer_release(
    feed: &dyn ReleaseFeed,
    installed: &str,
) -> Result<Option<String>, UpdateError> {
    let latest = feed.latest()?;
    let latest: String = latest.trim().chars().take(MAX_FEED_LEN).collect();

    if parse_version(&latest) > parse_version(installed) {
        Ok(Some(latest))
    } else {
        Ok(None)
    }
}

/// Checks `feed` on a detached thread and logs a notice if a newer version
/// exists. Failures are only logged at debug level.
pub fn spawn_check(feed: impl ReleaseFeed) -> JoinHandle<()> {
    thread::spawn(move || {
        let installed = env!("CARGO_PKG_VERSION");
        match newer_release(&feed, installed) {
            Ok(Some(latest)) => info!(
                "SysColor: Version {} available! Installed version: {}",
                latest, installed
            ),
            Ok(None) => debug!("SysColor {} is up to date", installed),
            Err(e) => debug!("Version check failed: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedFeed {
        body: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl FixedFeed {
        fn new(body: Option<&'static str>) -> Self {
            Self {
                body,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl ReleaseFeed for FixedFeed {
        fn latest(&self) -> Result<String, UpdateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body
                .map(str::to_string)
                .ok_or_else(|| UpdateError::Fetch("offline".into()))
        }
    }

    #[test]
    fn parses_full_and_partial_versions() {
        assert_eq!(parse_version("2.0.0"), 2_000_000);
        assert_eq!(parse_version("2.1"), 2_001_000);
        assert_eq!(parse_version("3"), 3_000_000);
        assert_eq!(parse_version("1.12.345"), 1_012_345);
        assert_eq!(parse_version("2.1.3-beta"), 2_001_003);
        assert_eq!(parse_version(" 4.0.1\n"), 4_000_001);
    }

    #[test]
    fn non_numeric_versions_are_zero() {
        assert_eq!(parse_version(""), 0);
        assert_eq!(parse_version("<html>"), 0);
        assert_eq!(parse_version("v2.0.0"), 0);
    }

    #[test]
    fn reports_only_newer_releases() {
        let newer = FixedFeed::new(Some("2.0.1\n"));
        let same = FixedFeed::new(Some("2.0.0"));
        let older = FixedFeed::new(Some("1.9.9"));

        assert_eq!(
            newer_release(&newer, "2.0.0").unwrap(),
            Some("2.0.1".into())
        );
        assert_eq!(newer_release(&same, "2.0.0").unwrap(), None);
        assert_eq!(newer_release(&older, "2.0.0").unwrap(), None);
    }

    #[test]
    fn feed_errors_propagate() {
        let offline = FixedFeed::new(None);
        assert!(matches!(
            newer_release(&offline, "2.0.0"),
            Err(UpdateError::Fetch(_))
        ));
    }

    #[test]
    fn spawned_check_runs_once_and_never_panics() {
        let feed = FixedFeed::new(None);
        let calls = feed.calls.clone();

        spawn_check(feed).join().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
