//! # make-targets
//!
//! Procedural test-pattern synthesizer for checking displays and projectors.
//!
//! A fixed catalog of patterns (line grids, checkerboards, zone plates,
//! rings, polka dots, honeycombs, wedges, calibration ramps) is rendered at
//! several canvas sizes and spatial densities into 16-bit RGBA images. Each
//! image is encoded through a transfer table (sRGB by default) and written
//! to disk. Continuous-tone patterns also get a black-and-white variant,
//! either thresholded and smoothed or stochastically dithered.
//!
//! ## Architecture
//!
//! Data flows strictly downstream:
//!
//! 1. **Transfer tables** ([`transfer`]) are built once, then shared read-only.
//! 2. **Pattern library** ([`pattern`] and the `pattern_*` families) maps
//!    (size, density) to a [`Canvas`] and a post-process flag.
//! 3. **Colour pipeline** converts R, G and B through a table, alpha intact.
//! 4. **Post-processor** ([`postprocess`]) derives the variant.
//! 5. **Scheduler** ([`scheduler`]) drives the whole catalog through a
//!    worker pool into an [`ImageSink`].
//!
//! ```no_run
//! use make_targets::{PngSink, RenderConfig, Scheduler, TransferLuts};
//!
//! let config = RenderConfig::default();
//! let luts = TransferLuts::build();
//! let sink = PngSink::create("out")?;
//! let summary = Scheduler::new(&config, &luts, &sink).run(Some("tv"))?;
//! println!("{} files", summary.files);
//! # Ok::<(), make_targets::Error>(())
//! ```

// Phase 1: Foundation Types & Math
pub mod basics;
pub mod color;
pub mod error;
pub mod math;
pub mod trans_affine;

// Phase 2: Pixel Buffers & Rasterization
pub mod blur;
pub mod canvas;
pub mod raster;

// Phase 3: Colour Pipeline
pub mod postprocess;
pub mod transfer;

// Phase 4: Pattern Library
pub mod pattern;
pub mod pattern_grid;
pub mod pattern_radial;
pub mod pattern_ramp;
pub mod pattern_shapes;

// Phase 5: Jobs & Persistence
pub mod config;
pub mod render;
pub mod scheduler;
pub mod sink;

pub use basics::Size;
pub use canvas::Canvas;
pub use color::Rgba16;
pub use config::{RenderConfig, SizeClass};
pub use error::{Error, Result};
pub use pattern::{Density, Family, Pattern, PatternSpec, Synthesis};
pub use postprocess::PostProcessMode;
pub use render::{render, RenderedImage};
pub use scheduler::{RenderJob, RunSummary, Scheduler, SchedulerState};
pub use sink::{ImageSink, PngSink};
pub use transfer::{TransferKind, TransferLut, TransferLuts};
