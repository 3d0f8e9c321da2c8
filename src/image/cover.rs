//! Podcast cover images.
//!
//! Every podcast page gets `<slug>/cover.jpg`: the feed image scaled to a
//! square, or a copy of the configured default cover when the feed has no
//! usable image.

use crate::{
    debug,
    fetch::{FetchPolicy, download_if_outdated},
    log,
};
use anyhow::{Context, Result};
use image::{ImageReader, codecs::jpeg::JpegEncoder, imageops::FilterType};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// File name of the cover inside each podcast's output directory.
pub const COVER_FILE: &str = "cover.jpg";

const JPEG_QUALITY: u8 = 90;

/// Where covers come from and go to.
#[derive(Debug, Clone)]
pub struct CoverSettings {
    pub cache_dir: PathBuf,
    pub output_dir: PathBuf,
    pub default_cover: PathBuf,
    /// Edge length of the square output in pixels.
    pub size: u32,
    pub policy: FetchPolicy,
}

/// Which image ended up as the cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSource {
    Feed,
    Default,
}

impl CoverSettings {
    /// `<output>/<slug>/cover.jpg`
    pub fn output_path(&self, slug: &str) -> PathBuf {
        self.output_dir.join(slug).join(COVER_FILE)
    }

    /// `<cache>/<slug>.cover`
    fn cache_path(&self, slug: &str) -> PathBuf {
        self.cache_dir.join(format!("{slug}.cover"))
    }

    /// Produce the cover for one podcast.
    ///
    /// Failures with the feed image are logged and fall back to the default
    /// cover. Only a failing default cover is an error.
    pub fn build(&self, slug: &str, image_url: Option<&str>) -> Result<CoverSource> {
        let dst = self.output_path(slug);

        if let Some(url) = image_url {
            let cached = self.cache_path(slug);
            let result = download_if_outdated(url, &cached, &self.policy)
                .and_then(|_| create_cover(&cached, &dst, self.size));
            match result {
                Ok(()) => {
                    debug!("cover"; "{slug}: scaled {url}");
                    return Ok(CoverSource::Feed);
                }
                Err(e) => log!("cover"; "{slug}: {e:#}, using default cover"),
            }
        }

        use_default_cover(&self.default_cover, &dst)
            .with_context(|| format!("podcast '{slug}': no cover available"))?;
        Ok(CoverSource::Default)
    }
}

/// Decode `src` (format guessed from its content), scale to `size`x`size`
/// with a bilinear filter and write it as JPEG.
pub fn create_cover(src: &Path, dst: &Path, size: u32) -> Result<()> {
    let img = ImageReader::open(src)
        .with_context(|| format!("Failed to open {}", src.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read {}", src.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", src.display()))?;

    let scaled = img.resize_exact(size, size, FilterType::Triangle).to_rgb8();

    create_parent(dst)?;
    let file = File::create(dst).with_context(|| format!("Failed to create {}", dst.display()))?;
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
    encoder
        .encode_image(&scaled)
        .with_context(|| format!("Failed to encode {}", dst.display()))?;
    Ok(())
}

/// Copy the default cover to `dst` unchanged.
pub fn use_default_cover(default_cover: &Path, dst: &Path) -> Result<()> {
    create_parent(dst)?;
    fs::copy(default_cover, dst).with_context(|| {
        format!(
            "Failed to copy default cover {} to {}",
            default_cover.display(),
            dst.display()
        )
    })?;
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}
