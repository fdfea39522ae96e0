//! Static render configuration: size classes, densities, pattern set.
//!
//! There is no configuration file. [`RenderConfig::default`] is the full
//! catalog; callers narrow it (a size-class filter, a different
//! post-processor, fewer workers) before handing it to the scheduler.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::basics::Size;
use crate::error::{Error, Result};
use crate::pattern::{Density, Pattern};
use crate::postprocess::PostProcessMode;
use crate::transfer::TransferKind;

/// Density list rendered for every size class and pattern.
pub const DENSITIES: [u32; 7] = [2, 5, 10, 30, 60, 120, 480];

/// A named canvas size. The name prefixes every file in the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeClass {
    pub name: String,
    pub size: Size,
}

impl SizeClass {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            size: Size::new(width, height),
        }
    }
}

/// The built-in size classes.
pub fn default_size_classes() -> Vec<SizeClass> {
    vec![
        SizeClass::new("tv", 3840, 2160),
        SizeClass::new("tvx2", 3840 * 2, 2160 * 2),
        SizeClass::new("proj", 3840, 2400),
    ]
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub size_classes: Vec<SizeClass>,
    pub densities: Vec<u32>,
    pub patterns: Vec<Pattern>,
    pub post_process: PostProcessMode,
    /// Transfer applied to every primary image before it is written.
    pub output_transfer: TransferKind,
    /// Worker threads; `None` means one per available core.
    pub workers: Option<usize>,
    pub out_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size_classes: default_size_classes(),
            densities: DENSITIES.to_vec(),
            patterns: Pattern::ALL.to_vec(),
            post_process: PostProcessMode::default(),
            output_transfer: TransferKind::SrgbEncode,
            workers: None,
            out_dir: PathBuf::from("."),
        }
    }
}

impl RenderConfig {
    /// Reject configurations no job could be built from: zero densities and
    /// empty canvases.
    pub fn validate(&self) -> Result<()> {
        for &n in &self.densities {
            Density::new(n)?;
        }
        for class in &self.size_classes {
            if class.size.is_empty() {
                return Err(Error::EmptySize {
                    width: class.size.width,
                    height: class.size.height,
                });
            }
        }
        Ok(())
    }

    /// Validated densities, in configured order.
    pub fn densities(&self) -> Result<Vec<Density>> {
        self.densities.iter().map(|&n| Density::new(n)).collect()
    }

    pub fn size_class(&self, name: &str) -> Option<&SizeClass> {
        self.size_classes.iter().find(|c| c.name == name)
    }

    /// Effective worker count: the override, or the available parallelism.
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.max(1),
            None => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}
