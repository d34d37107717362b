//! Batch image pipeline
//!
//! Walks a flat directory of source images and writes width-capped WebP and
//! JPEG variants for the site's responsive `srcset`s. Per-file and per-width
//! failures are logged and the run continues.

use anyhow::{Context, Result};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use webp::Encoder as WebpEncoder;

/// Widths the site's markup references.
pub const DEFAULT_WIDTHS: [u32; 4] = [320, 640, 1024, 1600];

const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "avif", "webp"];

#[derive(Debug, Clone)]
pub struct OptimizeConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub widths: Vec<u32>,
    pub webp_quality: f32,
    pub jpeg_quality: u8,
}

impl OptimizeConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            widths: DEFAULT_WIDTHS.to_vec(),
            webp_quality: 80.0,
            jpeg_quality: 82,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeSummary {
    pub files: usize,
    pub variants: usize,
    pub failures: usize,
}

/// Process every supported image in the input directory.
pub fn optimize_directory(config: &OptimizeConfig) -> Result<OptimizeSummary> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let mut summary = OptimizeSummary::default();

    for entry in fs::read_dir(&config.input_dir).with_context(|| {
        format!(
            "Failed to read input directory {}",
            config.input_dir.display()
        )
    })? {
        let path = entry?.path();
        if !path.is_file() || !is_supported(&path) {
            continue;
        }

        match process_file(&path, config) {
            Ok((written, failed)) => {
                summary.files += 1;
                summary.variants += written;
                summary.failures += failed;
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "Failed to process image");
                summary.failures += 1;
            }
        }
    }

    info!(
        files = summary.files,
        variants = summary.variants,
        failures = summary.failures,
        output = %config.output_dir.display(),
        "Image optimization complete"
    );

    Ok(summary)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Write one WebP and one JPEG variant per configured width.
///
/// Widths larger than the source upscale, matching what the site's markup
/// assumes about available variants. A failure at one width is logged and
/// the remaining widths still run; returns (variants written, widths failed).
fn process_file(path: &Path, config: &OptimizeConfig) -> Result<(usize, usize)> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Image file name is not valid UTF-8")?;

    let img = image::open(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    let mut written = 0;
    let mut failed = 0;

    for &width in &config.widths {
        match write_variants(&img, stem, width, config) {
            Ok(count) => written += count,
            Err(err) => {
                error!(path = %path.display(), width, error = %err, "Failed to write variants");
                failed += 1;
            }
        }
    }

    Ok((written, failed))
}

fn write_variants(
    img: &DynamicImage,
    stem: &str,
    width: u32,
    config: &OptimizeConfig,
) -> Result<usize> {
    let resized = img.resize(width, u32::MAX, FilterType::Lanczos3);

    let webp_path = config.output_dir.join(format!("{stem}-{width}.webp"));
    let rgba = resized.to_rgba8();
    let encoded = WebpEncoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
        .encode(config.webp_quality);
    fs::write(&webp_path, &*encoded)
        .with_context(|| format!("Failed to write {}", webp_path.display()))?;

    let jpeg_path = config.output_dir.join(format!("{stem}-{width}.jpg"));
    let file = fs::File::create(&jpeg_path)
        .with_context(|| format!("Failed to create {}", jpeg_path.display()))?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, config.jpeg_quality);
    resized
        .to_rgb8()
        .write_with_encoder(encoder)
        .with_context(|| format!("Failed to encode {}", jpeg_path.display()))?;

    Ok(2)
}
