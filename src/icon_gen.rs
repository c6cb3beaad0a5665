use crate::{
    design::{IconSpec, Preset, DEFAULT_SIZES},
    error::IconError,
    manifest_json,
    render::{check_size, render_icon},
};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::FilterType,
    ColorType, DynamicImage, ImageEncoder, ImageError, ImageResult, RgbaImage,
};
use std::{
    fs::create_dir_all,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Caller supplied settings for one batch.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory the icons are written to, created when missing.
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub preset: Preset,
    /// Resample this image instead of drawing the icon.
    pub master: Option<PathBuf>,
    /// Also write the `icons.json` manifest fragment.
    pub manifest: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: PathBuf::from("./icons"),
            sizes: DEFAULT_SIZES.to_vec(),
            preset: Preset::default(),
            master: None,
            manifest: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedIcon {
    pub size: u32,
    pub path: PathBuf,
}

/// A single icon (or a whole skipped batch, when `size` is `None`) that could not be produced.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub size: Option<u32>,
    pub error: IconError,
}

/// Outcome of a batch: every icon either ends up in `written` or in `failures`.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<ExportedIcon>,
    pub failures: Vec<Failure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures of individual sizes, leaving out a skipped batch.
    pub fn icon_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.size.is_some())
            .count()
    }

    fn record(&mut self, size: u32, path: PathBuf, result: Result<(), IconError>) {
        match result {
            Ok(()) => {
                log::info!("Created {}", path.display());
                self.written.push(ExportedIcon { size, path });
            }
            Err(error) => {
                log::error!(
                    "Error creating {} ({}px): {}",
                    path.display(),
                    size,
                    error.describe()
                );
                self.failures.push(Failure {
                    path,
                    size: Some(size),
                    error,
                });
            }
        }
    }

    fn skip_batch(&mut self, source: &Path, error: IconError) {
        log::error!("Skipping all sizes: {}", error.describe());
        self.failures.push(Failure {
            path: source.to_path_buf(),
            size: None,
            error,
        });
    }

    fn manifest_entries(&self) -> Vec<(u32, String)> {
        self.written
            .iter()
            .filter_map(|icon| {
                let filename = icon.path.file_name()?.to_string_lossy().into_owned();
                Some((icon.size, filename))
            })
            .collect()
    }
}

/// Conventional file name for an icon of the given size.
pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}

/// Produce every requested size, either drawn from the preset or resampled from a master image.
///
/// Failures are logged and collected per icon; they never stop the remaining sizes.
pub fn generate_icons(options: &Options) -> BatchReport {
    let report = match &options.master {
        Some(master) => generate_from_master(master, &options.sizes, &options.output),
        None => generate_procedural(&options.preset.spec(), &options.sizes, &options.output),
    };

    if options.manifest && !report.written.is_empty() {
        match manifest_json::write_manifest(&options.output, &report.manifest_entries()) {
            Ok(()) => log::info!(
                "Created {}",
                options.output.join(manifest_json::MANIFEST_FILE).display()
            ),
            Err(err) => log::error!("{err:#}"),
        }
    }

    report
}

/// Draw the icon described by `spec` at each size.
pub fn generate_procedural(spec: &IconSpec, sizes: &[u32], out_dir: &Path) -> BatchReport {
    let mut report = BatchReport::default();

    for &size in sizes {
        let path = out_dir.join(icon_file_name(size));
        let result = render_icon(size, spec).and_then(|icon| export_png(&icon, &path));
        report.record(size, path, result);
    }

    report
}

/// Resample the image at `master` to each size.
///
/// A master that is missing or unreadable skips the whole batch with one diagnostic.
pub fn generate_from_master(master: &Path, sizes: &[u32], out_dir: &Path) -> BatchReport {
    let mut report = BatchReport::default();

    let source = match load_master(master) {
        Ok(source) => source,
        Err(err) => {
            report.skip_batch(master, err);
            return report;
        }
    };

    for &size in sizes {
        let path = out_dir.join(icon_file_name(size));
        let result = resize_from_master(&source, size).and_then(|icon| export_png(&icon, &path));
        report.record(size, path, result);
    }

    report
}

pub fn load_master(path: &Path) -> Result<DynamicImage, IconError> {
    if !path.is_file() {
        return Err(IconError::MissingSourceFile(path.to_path_buf()));
    }

    let source = image::open(path).map_err(|source| IconError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    if source.width() != source.height() {
        log::warn!(
            "Source icon is {}x{}, output will be stretched to a square",
            source.width(),
            source.height()
        );
    }

    Ok(source)
}

/// Lanczos3 resample of the master to `size` x `size`.
pub fn resize_from_master(source: &DynamicImage, size: u32) -> Result<RgbaImage, IconError> {
    check_size(size)?;

    Ok(source
        .resize_exact(size, size, FilterType::Lanczos3)
        .to_rgba8())
}

/// Save `icon` as PNG at `path`, creating the parent directory when missing.
///
/// The data goes to a temporary file next to the destination first, so a
/// failed write leaves no partial icon behind.
pub fn export_png(icon: &RgbaImage, path: &Path) -> Result<(), IconError> {
    let write_failure = |source: ImageError| IconError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    create_dir_all(dir).map_err(|err| write_failure(ImageError::IoError(err)))?;

    let mut file =
        NamedTempFile::new_in(dir).map_err(|err| write_failure(ImageError::IoError(err)))?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        write_png(icon.as_raw(), &mut writer, icon.width(), icon.height())
            .map_err(write_failure)?;
        writer
            .flush()
            .map_err(|err| write_failure(ImageError::IoError(err)))?;
    }

    file.persist(path)
        .map_err(|err| write_failure(ImageError::IoError(err.error)))?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> ImageResult<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgba8)
}
