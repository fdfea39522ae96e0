//! Pattern registry.
//!
//! Each [`Pattern`] variant is one named synthesis function. The registry
//! carries the human-readable name used in output file names, the family the
//! pattern belongs to, and dispatches synthesis to the family module.
//!
//! The meaning of the density parameter is pattern-specific:
//!
//! | pattern | density `n` |
//! |---|---|
//! | `jail_*`, `diamond` | line spacing `width / n` |
//! | `crosshatch` | jail at `n` plus a 45° jail at `n / √2` |
//! | `check`, `jail_check` | `n` cells across the long edge |
//! | `stripes_*` | `n` stripes across the long edge |
//! | `radial` | chirp rate `π / (n · half-diagonal)` |
//! | `rings`, `ring_wave` | period `long / n` pixels |
//! | `wavy` | half-period `long / n` pixels |
//! | `ring_fade` | sinc period `half-diagonal / n` pixels |
//! | `radial_wave`, `ring_wave` | `n` angular periods |
//! | `square_wave` | exponent `n / 100` |
//! | `polka_*` | `(n-1)²` dots on a `long / n` lattice |
//! | `honeycomb` | hexagon diameter `long / n` |
//! | `s_curve` | `n + 1` chords per quadrant |
//! | `radial_wedge*` | `n` dark wedges |
//! | `field` | gray level `n / 480` |
//! | `ramp_*` | `n` plain/dithered band pairs |

use std::num::NonZeroU32;

use crate::basics::Size;
use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::transfer::{TransferKind, TransferLuts};
use crate::{pattern_grid, pattern_radial, pattern_ramp, pattern_shapes};

// ============================================================================
// Density
// ============================================================================

/// A pattern's spatial-density parameter. Zero is unrepresentable, so every
/// divisor derived from it is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Density(NonZeroU32);

impl Density {
    pub fn new(n: u32) -> Result<Self> {
        NonZeroU32::new(n).map(Density).ok_or(Error::ZeroDensity)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

// ============================================================================
// Families
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Integer bucketing of (possibly rotated) coordinates.
    Grid,
    /// Trigonometric functions of radius and angle.
    Radial,
    /// Explicit geometric primitives on a lattice.
    Shapes,
    /// Flat fields and calibration ramps.
    Ramp,
}

// ============================================================================
// Pattern
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    JailWhite,
    JailBlack,
    JailDark,
    JailMid,
    JailCheck,
    Check,
    Radial,
    Rings,
    RingFade,
    Wavy,
    RadialWave,
    RingWave,
    StripesH,
    StripesV,
    StripesDl,
    StripesDr,
    PolkaDot,
    PolkaDark,
    PolkaMid,
    Field,
    RadialWedge,
    RadialWedgeOffsetX,
    RadialWedgeOffsetY,
    Diamond,
    Crosshatch,
    Honeycomb,
    SCurve,
    SquareWave,
    RampLinear,
    RampGamma,
    RampInverseGamma,
}

impl Pattern {
    /// Every registered pattern, in catalog order.
    pub const ALL: [Pattern; 31] = [
        Pattern::JailWhite,
        Pattern::JailBlack,
        Pattern::JailDark,
        Pattern::JailMid,
        Pattern::JailCheck,
        Pattern::Check,
        Pattern::Radial,
        Pattern::Rings,
        Pattern::RingFade,
        Pattern::Wavy,
        Pattern::RadialWave,
        Pattern::RingWave,
        Pattern::StripesH,
        Pattern::StripesV,
        Pattern::StripesDl,
        Pattern::StripesDr,
        Pattern::PolkaDot,
        Pattern::PolkaDark,
        Pattern::PolkaMid,
        Pattern::Field,
        Pattern::RadialWedge,
        Pattern::RadialWedgeOffsetX,
        Pattern::RadialWedgeOffsetY,
        Pattern::Diamond,
        Pattern::Crosshatch,
        Pattern::Honeycomb,
        Pattern::SCurve,
        Pattern::SquareWave,
        Pattern::RampLinear,
        Pattern::RampGamma,
        Pattern::RampInverseGamma,
    ];

    /// Name used in output files.
    pub fn name(self) -> &'static str {
        match self {
            Pattern::JailWhite => "jail_white",
            Pattern::JailBlack => "jail_black",
            Pattern::JailDark => "jail_dark",
            Pattern::JailMid => "jail_mid",
            Pattern::JailCheck => "jail_check",
            Pattern::Check => "check",
            Pattern::Radial => "radial",
            Pattern::Rings => "rings",
            Pattern::RingFade => "ring_fade",
            Pattern::Wavy => "wavy",
            Pattern::RadialWave => "radial_wave",
            Pattern::RingWave => "ring_wave",
            Pattern::StripesH => "stripes_h",
            Pattern::StripesV => "stripes_v",
            Pattern::StripesDl => "stripes_dl",
            Pattern::StripesDr => "stripes_dr",
            Pattern::PolkaDot => "polka_dot",
            Pattern::PolkaDark => "polka_dark",
            Pattern::PolkaMid => "polka_mid",
            Pattern::Field => "field",
            Pattern::RadialWedge => "radial_wedge",
            Pattern::RadialWedgeOffsetX => "radial_wedge_offset_x",
            Pattern::RadialWedgeOffsetY => "radial_wedge_offset_y",
            Pattern::Diamond => "diamond",
            Pattern::Crosshatch => "crosshatch",
            Pattern::Honeycomb => "honeycomb",
            Pattern::SCurve => "s_curve",
            Pattern::SquareWave => "square_wave",
            Pattern::RampLinear => "ramp_linear",
            Pattern::RampGamma => "ramp_gamma",
            Pattern::RampInverseGamma => "ramp_inverse_gamma",
        }
    }

    pub fn from_name(name: &str) -> Option<Pattern> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }

    pub fn family(self) -> Family {
        match self {
            Pattern::JailWhite
            | Pattern::JailBlack
            | Pattern::JailDark
            | Pattern::JailMid
            | Pattern::JailCheck
            | Pattern::Check
            | Pattern::StripesH
            | Pattern::StripesV
            | Pattern::StripesDl
            | Pattern::StripesDr
            | Pattern::Diamond
            | Pattern::Crosshatch => Family::Grid,
            Pattern::Radial
            | Pattern::Rings
            | Pattern::RingFade
            | Pattern::Wavy
            | Pattern::RadialWave
            | Pattern::RingWave
            | Pattern::SquareWave => Family::Radial,
            Pattern::PolkaDot
            | Pattern::PolkaDark
            | Pattern::PolkaMid
            | Pattern::RadialWedge
            | Pattern::RadialWedgeOffsetX
            | Pattern::RadialWedgeOffsetY
            | Pattern::Honeycomb
            | Pattern::SCurve => Family::Shapes,
            Pattern::Field
            | Pattern::RampLinear
            | Pattern::RampGamma
            | Pattern::RampInverseGamma => Family::Ramp,
        }
    }

    /// Synthesize this pattern. `None` means the size/density combination
    /// is degenerate and nothing should be written.
    pub fn synthesize(self, spec: &PatternSpec, luts: &TransferLuts) -> Option<Synthesis> {
        use pattern_grid as g;
        use pattern_radial as r;
        use pattern_shapes as s;

        let mut synthesis = match self {
            Pattern::JailWhite => g::jail_white(spec),
            Pattern::JailBlack => g::jail_black(spec),
            Pattern::JailDark => g::jail_dark(spec),
            Pattern::JailMid => g::jail_mid(spec),
            Pattern::JailCheck => g::jail_check(spec),
            Pattern::Check => g::check(spec),
            Pattern::Diamond => g::diamond(spec),
            Pattern::Crosshatch => g::crosshatch(spec),
            Pattern::StripesH => g::stripes(spec, 90.0),
            Pattern::StripesV => g::stripes(spec, 0.0),
            Pattern::StripesDl => g::stripes(spec, 45.0),
            Pattern::StripesDr => g::stripes(spec, -45.0),
            Pattern::Radial => r::radial(spec),
            Pattern::Rings => r::rings(spec),
            Pattern::RingFade => r::ring_fade(spec),
            Pattern::Wavy => r::wavy(spec),
            Pattern::RadialWave => r::radial_wave(spec),
            Pattern::RingWave => r::ring_wave(spec),
            Pattern::SquareWave => r::square_wave(spec),
            Pattern::PolkaDot => s::polka_dot(spec),
            Pattern::PolkaDark => s::polka_dark(spec),
            Pattern::PolkaMid => s::polka_mid(spec),
            Pattern::Honeycomb => s::honeycomb(spec),
            Pattern::SCurve => s::s_curve(spec),
            Pattern::RadialWedge => s::radial_wedge(spec, 0.0, 0.0),
            Pattern::RadialWedgeOffsetX => s::radial_wedge(spec, -1.5, 0.0),
            Pattern::RadialWedgeOffsetY => s::radial_wedge(spec, 0.0, 1.5),
            Pattern::Field => pattern_ramp::field(spec),
            Pattern::RampLinear => pattern_ramp::ramp(spec, luts.get(TransferKind::Linear)),
            Pattern::RampGamma => pattern_ramp::ramp(spec, luts.get(TransferKind::Gamma22Encode)),
            Pattern::RampInverseGamma => {
                pattern_ramp::ramp(spec, luts.get(TransferKind::Gamma22Decode))
            }
        }?;

        if self.family() == Family::Grid {
            synthesis.canvas.correct_edges();
        }
        Some(synthesis)
    }
}

// ============================================================================
// Spec and result
// ============================================================================

/// What to synthesize: pattern, canvas size and density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternSpec {
    pub pattern: Pattern,
    pub size: Size,
    pub density: Density,
}

impl PatternSpec {
    pub fn new(pattern: Pattern, size: Size, density: Density) -> Self {
        Self {
            pattern,
            size,
            density,
        }
    }

    pub fn name(&self) -> &'static str {
        self.pattern.name()
    }

    /// Density as a float, for the formulas.
    #[inline]
    pub fn n(&self) -> f64 {
        self.density.get() as f64
    }

    /// Long-edge lattice cell, `long / n` pixels. `None` when the density
    /// exceeds the long edge, which every pattern treats as degenerate.
    pub fn cell(&self) -> Option<f64> {
        let long = self.size.long_edge();
        if self.size.is_empty() || long / self.density.get() == 0 {
            return None;
        }
        Some(long as f64 / self.n())
    }

    pub fn synthesize(&self, luts: &TransferLuts) -> Option<Synthesis> {
        self.pattern.synthesize(self, luts)
    }
}

/// A synthesized canvas plus whether a post-processed variant is wanted.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub canvas: Canvas,
    pub post_process: bool,
}

impl Synthesis {
    pub fn new(canvas: Canvas, post_process: bool) -> Self {
        Self {
            canvas,
            post_process,
        }
    }
}
