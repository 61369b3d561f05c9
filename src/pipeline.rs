//! File-to-file filtering: read, decode, transform, encode, write.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use enough::{Stop, Unstoppable};
use thiserror::Error;

use crate::decode::DecodeRequest;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::transform::Transform;

/// Errors from a pipeline run, by stage.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Decoding, encoding, or transform lookup failed.
    #[error(transparent)]
    Bitmap(#[from] BitmapError),

    /// Reading the source failed.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or renaming the destination failed.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a successful run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineReport {
    pub transform: Transform,
    pub width: u32,
    pub height: u32,
    pub bytes_read: usize,
    pub bytes_written: usize,
}

/// Applies one [`Transform`] to a BMP file.
///
/// ```no_run
/// use bmpfilter::Pipeline;
///
/// let report = Pipeline::from_name("sepia")?.run("in.bmp", "out.bmp")?;
/// println!("{}x{}", report.width, report.height);
/// # Ok::<(), bmpfilter::PipelineError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Pipeline {
    transform: Transform,
    limits: Option<Limits>,
    atomic: bool,
}

impl Pipeline {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            limits: None,
            atomic: true,
        }
    }

    /// Look up the transform by name. Unknown names fail with
    /// [`BitmapError::UnknownTransform`].
    pub fn from_name(name: &str) -> Result<Self, BitmapError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Write through a temporary file in the destination directory and
    /// rename it into place (default). When off, the destination is
    /// written directly and may be left partial on failure.
    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn run(
        &self,
        src: impl AsRef<Path>,
        dst: impl AsRef<Path>,
    ) -> Result<PipelineReport, PipelineError> {
        self.run_with_stop(src, dst, Unstoppable)
    }

    /// Like [`Pipeline::run`], checking `stop` between rows.
    ///
    /// Nothing is written unless decoding succeeds.
    #[tracing::instrument(skip_all, fields(transform = %self.transform))]
    pub fn run_with_stop(
        &self,
        src: impl AsRef<Path>,
        dst: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<PipelineReport, PipelineError> {
        let src = src.as_ref();
        let dst = dst.as_ref();

        let data = fs::read(src).map_err(|source| PipelineError::Read {
            path: src.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %src.display(), bytes = data.len(), "read source");

        let mut request = DecodeRequest::new(&data);
        if let Some(limits) = &self.limits {
            request = request.with_limits(limits);
        }
        let mut image = request.decode_dyn(&stop)?;

        self.transform.apply(image.pixels_mut());
        stop.check().map_err(BitmapError::from)?;

        let encoded = crate::bmp::encode_image(&image, &stop)?;
        if self.atomic {
            write_atomic(dst, &encoded)
        } else {
            fs::write(dst, &encoded)
        }
        .map_err(|source| PipelineError::Write {
            path: dst.to_path_buf(),
            source,
        })?;
        tracing::info!(
            src = %src.display(),
            dst = %dst.display(),
            width = image.width(),
            height = image.height(),
            "filtered image"
        );

        Ok(PipelineReport {
            transform: self.transform,
            width: image.width(),
            height: image.height(),
            bytes_read: data.len(),
            bytes_written: encoded.len(),
        })
    }
}

/// Write `bytes` to a temp file next to `dst`, then rename over `dst`.
///
/// The temp file is removed if anything fails before the rename.
fn write_atomic(dst: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(dst).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_rejects_unknown() {
        assert!(matches!(
            Pipeline::from_name("nope"),
            Err(BitmapError::UnknownTransform(_))
        ));
        assert_eq!(
            Pipeline::from_name("reflectX").unwrap().transform(),
            Transform::ReflectX
        );
    }

    #[test]
    fn write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("out.bmp");
        fs::write(&dst, b"old").unwrap();
        write_atomic(&dst, b"new contents").unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"new contents");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
