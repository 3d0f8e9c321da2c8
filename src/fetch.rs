//! Cached HTTP downloads.
//!
//! Feeds and cover images land in the cache directory and are reused while
//! their mtime is younger than `max_age`. Downloads go to a temporary sibling
//! first, so an aborted transfer never replaces a good cached copy.

use crate::{debug, utils::mtime::is_fresh};
use anyhow::{Context, Result, bail};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(30);

/// How cached downloads are reused.
#[derive(Debug, Clone, Copy)]
pub struct FetchPolicy {
    /// Cached files younger than this are not downloaded again.
    pub max_age: Duration,
    /// Never touch the network; a missing cache entry is an error.
    pub offline: bool,
}

/// Download `url` into `dst` unless `dst` is still fresh.
///
/// Returns `true` when a download actually happened.
pub fn download_if_outdated(url: &str, dst: &Path, policy: &FetchPolicy) -> Result<bool> {
    if policy.offline {
        if !dst.exists() {
            bail!("offline and no cached copy at {}", dst.display());
        }
        debug!("fetch"; "offline, using {}", dst.display());
        return Ok(false);
    }

    if is_fresh(dst, policy.max_age) {
        debug!("fetch"; "fresh, skipping {}", url);
        return Ok(false);
    }

    download(url, dst)?;
    debug!("fetch"; "downloaded {}", url);
    Ok(true)
}

fn download(url: &str, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let response = ureq::AgentBuilder::new()
        .timeout(TIMEOUT)
        .build()
        .get(url)
        .call()
        .with_context(|| format!("GET {url}"))?;

    let tmp = temp_path(dst);
    let result = (|| -> Result<()> {
        let mut file =
            File::create(&tmp).with_context(|| format!("Failed to create {}", tmp.display()))?;
        io::copy(&mut response.into_reader(), &mut file)
            .with_context(|| format!("Failed to read body of {url}"))?;
        fs::rename(&tmp, dst)
            .with_context(|| format!("Failed to move download to {}", dst.display()))
    })();

    if result.is_err() {
        fs::remove_file(&tmp).ok();
    }
    result
}

/// `<dst>.part`, next to `dst` so the final rename stays on one filesystem.
fn temp_path(dst: &Path) -> PathBuf {
    let mut name = dst.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dst.with_file_name(name)
}
