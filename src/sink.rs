//! Persistence: where finished canvases go.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::error::{ParameterError, ParameterErrorKind};
use image::{ImageBuffer, ImageError, ImageFormat, Rgba};

use crate::canvas::Canvas;
use crate::error::{Error, Result};

/// Receives every finished canvas together with its base file name.
///
/// Shared by all workers, so implementations must be `Sync`. Any error is
/// fatal to the run.
pub trait ImageSink: Sync {
    fn save(&self, canvas: &Canvas, stem: &str) -> Result<()>;
}

/// Writes 16-bit RGBA PNG files into a directory.
#[derive(Debug, Clone)]
pub struct PngSink {
    dir: PathBuf,
}

impl PngSink {
    /// Use `dir` as the output directory, creating it if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| Error::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file written for `stem`.
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{}.png", stem))
    }
}

impl ImageSink for PngSink {
    fn save(&self, canvas: &Canvas, stem: &str) -> Result<()> {
        let path = self.path_for(stem);
        let encode_err = |source: ImageError| Error::Encode {
            path: path.clone(),
            source,
        };
        let io_err = |source: std::io::Error| Error::Io {
            path: path.clone(),
            source,
        };

        let buf = ImageBuffer::<Rgba<u16>, &[u16]>::from_raw(
            canvas.width(),
            canvas.height(),
            canvas.data(),
        )
        .ok_or_else(|| {
            encode_err(ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            )))
        })?;

        let mut out = BufWriter::new(File::create(&path).map_err(io_err)?);
        buf.write_to(&mut out, ImageFormat::Png).map_err(encode_err)?;
        out.flush().map_err(io_err)?;
        Ok(())
    }
}
