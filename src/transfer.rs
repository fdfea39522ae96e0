//! Transfer functions and 16-bit lookup tables.
//!
//! Every table maps a 16-bit input sample to a 16-bit output sample over the
//! full 65536-entry domain. Tables are built once, before any job runs, and
//! are only ever read afterwards; [`TransferLuts`] bundles the whole set so
//! it can be shared by reference across worker threads.

use crate::basics::quantize16;
use crate::canvas::Canvas;
use crate::color::Rgba16;

/// Number of entries in every table.
pub const LUT_SIZE: usize = 1 << 16;

// ============================================================================
// Transfer function trait
// ============================================================================

/// A transfer function on normalized samples in `[0, 1]`.
pub trait TransferFunction {
    fn call(&self, x: f64) -> f64;
}

/// Power-law transfer: `x^gamma`.
#[derive(Debug, Clone, Copy)]
pub struct GammaPower {
    gamma: f64,
}

impl GammaPower {
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }
}

impl TransferFunction for GammaPower {
    #[inline]
    fn call(&self, x: f64) -> f64 {
        x.powf(self.gamma)
    }
}

// ============================================================================
// sRGB conversion functions
// ============================================================================

/// Convert sRGB value (0..1) to linear.
#[inline]
pub fn srgb_to_linear(x: f64) -> f64 {
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert linear value (0..1) to sRGB.
#[inline]
pub fn linear_to_srgb(x: f64) -> f64 {
    if x <= 0.0031308 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

// ============================================================================
// Transfer kinds
// ============================================================================

pub const GAMMA_22: f64 = 2.2;

/// The fixed set of tables the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferKind {
    /// Identity.
    Linear,
    /// Linear light to sRGB.
    SrgbEncode,
    /// sRGB to linear light.
    SrgbDecode,
    /// Gamma-2.2 encode, `x^2.2`.
    Gamma22Encode,
    /// Gamma-2.2 decode, `x^(1/2.2)`.
    Gamma22Decode,
}

impl TransferKind {
    pub const ALL: [TransferKind; 5] = [
        TransferKind::Linear,
        TransferKind::SrgbEncode,
        TransferKind::SrgbDecode,
        TransferKind::Gamma22Encode,
        TransferKind::Gamma22Decode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransferKind::Linear => "linear",
            TransferKind::SrgbEncode => "srgb-encode",
            TransferKind::SrgbDecode => "srgb-decode",
            TransferKind::Gamma22Encode => "gamma22-encode",
            TransferKind::Gamma22Decode => "gamma22-decode",
        }
    }
}

impl TransferFunction for TransferKind {
    fn call(&self, x: f64) -> f64 {
        match self {
            TransferKind::Linear => x,
            TransferKind::SrgbEncode => linear_to_srgb(x),
            TransferKind::SrgbDecode => srgb_to_linear(x),
            TransferKind::Gamma22Encode => GammaPower::new(GAMMA_22).call(x),
            TransferKind::Gamma22Decode => GammaPower::new(1.0 / GAMMA_22).call(x),
        }
    }
}

// ============================================================================
// Transfer LUT
// ============================================================================

/// A 65536-entry 16-bit → 16-bit table.
pub struct TransferLut {
    kind: TransferKind,
    table: Box<[u16]>,
}

impl std::fmt::Debug for TransferLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferLut").field("kind", &self.kind).finish()
    }
}

impl TransferLut {
    /// Build the table for `kind` over the full 16-bit domain.
    pub fn build(kind: TransferKind) -> Self {
        let table = if kind == TransferKind::Linear {
            (0..LUT_SIZE).map(|i| i as u16).collect()
        } else {
            (0..LUT_SIZE)
                .map(|i| quantize16(kind.call(i as f64 / 65535.0)))
                .collect()
        };
        Self { kind, table }
    }

    #[inline]
    pub fn lookup(&self, v: u16) -> u16 {
        self.table[v as usize]
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.table
    }

    /// Apply the table to R, G and B of every pixel; alpha is copied.
    /// The input is left untouched and the output has the same size.
    pub fn convert(&self, image: &Canvas) -> Canvas {
        image.map(|c| Rgba16::new(self.lookup(c.r), self.lookup(c.g), self.lookup(c.b), c.a))
    }
}

/// Colour pipeline entry point: see [`TransferLut::convert`].
pub fn convert(image: &Canvas, lut: &TransferLut) -> Canvas {
    lut.convert(image)
}

// ============================================================================
// LUT set
// ============================================================================

/// Every table, built once at startup and shared read-only afterwards.
#[derive(Debug)]
pub struct TransferLuts {
    linear: TransferLut,
    srgb_encode: TransferLut,
    srgb_decode: TransferLut,
    gamma22_encode: TransferLut,
    gamma22_decode: TransferLut,
}

impl TransferLuts {
    pub fn build() -> Self {
        let luts = Self {
            linear: TransferLut::build(TransferKind::Linear),
            srgb_encode: TransferLut::build(TransferKind::SrgbEncode),
            srgb_decode: TransferLut::build(TransferKind::SrgbDecode),
            gamma22_encode: TransferLut::build(TransferKind::Gamma22Encode),
            gamma22_decode: TransferLut::build(TransferKind::Gamma22Decode),
        };
        tracing::debug!(tables = TransferKind::ALL.len(), "transfer tables built");
        luts
    }

    pub fn get(&self, kind: TransferKind) -> &TransferLut {
        match kind {
            TransferKind::Linear => &self.linear,
            TransferKind::SrgbEncode => &self.srgb_encode,
            TransferKind::SrgbDecode => &self.srgb_decode,
            TransferKind::Gamma22Encode => &self.gamma22_encode,
            TransferKind::Gamma22Decode => &self.gamma22_decode,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
