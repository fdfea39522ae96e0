//! One job's in-memory pipeline: synthesis, colour conversion, and the
//! optional post-processed variant.

use crate::canvas::Canvas;
use crate::pattern::PatternSpec;
use crate::postprocess::PostProcessMode;
use crate::transfer::{TransferKind, TransferLuts};

/// Base file name: `{size class}_{pattern}_{density:03}` plus an optional
/// variant suffix.
pub fn file_stem(size_class: &str, pattern: &str, density: u32, suffix: &str) -> String {
    format!("{}_{}_{:03}{}", size_class, pattern, density, suffix)
}

/// Result of synthesis plus colour conversion.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub spec: PatternSpec,
    /// The pattern as synthesized, in linear light.
    pub synthesized: Canvas,
    /// `synthesized` through the output transfer table; this is the
    /// primary file.
    pub encoded: Canvas,
    pub needs_post_process: bool,
}

impl RenderedImage {
    /// The secondary variant, when the pattern asked for one. It is derived
    /// from the linear buffer, not the encoded one.
    pub fn post_process(&self, mode: PostProcessMode) -> Option<Canvas> {
        if self.needs_post_process {
            Some(mode.apply(&self.synthesized))
        } else {
            None
        }
    }
}

/// Synthesize `spec` and encode it with `output`. `None` when the pattern
/// is degenerate at this size and density.
pub fn render(spec: &PatternSpec, luts: &TransferLuts, output: TransferKind) -> Option<RenderedImage> {
    let synthesis = spec.synthesize(luts)?;
    let encoded = luts.get(output).convert(&synthesis.canvas);
    Some(RenderedImage {
        spec: *spec,
        synthesized: synthesis.canvas,
        encoded,
        needs_post_process: synthesis.post_process,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::Size;
    use crate::pattern::{Density, Pattern};

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("tv", "rings", 5, ""), "tv_rings_005");
        assert_eq!(file_stem("tvx2", "jail_mid", 480, ""), "tvx2_jail_mid_480");
        assert_eq!(file_stem("proj", "radial", 30, "_clamp"), "proj_radial_030_clamp");
        assert_eq!(file_stem("tv", "wavy", 1234, "_dith"), "tv_wavy_1234_dith");
    }

    #[test]
    fn test_render_encodes_with_output_table() {
        let luts = TransferLuts::build();
        let spec = PatternSpec::new(Pattern::Field, Size::new(240, 8), Density::new(120).unwrap());
        let img = render(&spec, &luts, TransferKind::SrgbEncode).unwrap();
        let lin = img.synthesized.pixel(0, 0);
        let enc = img.encoded.pixel(0, 0);
        assert_eq!(enc.r, luts.get(TransferKind::SrgbEncode).lookup(lin.r));
        assert_eq!(enc.a, lin.a);
        assert!(enc.r > lin.r);
        assert!(img.needs_post_process);
    }

    #[test]
    fn test_post_process_reads_linear_buffer() {
        let luts = TransferLuts::build();
        let spec = PatternSpec::new(Pattern::Rings, Size::new(64, 64), Density::new(4).unwrap());
        let img = render(&spec, &luts, TransferKind::SrgbEncode).unwrap();
        let variant = img.post_process(PostProcessMode::Dither).unwrap();
        assert_eq!(variant, PostProcessMode::Dither.apply(&img.synthesized));
        assert_ne!(variant, PostProcessMode::Dither.apply(&img.encoded));
    }

    #[test]
    fn test_no_variant_without_flag() {
        let luts = TransferLuts::build();
        let spec = PatternSpec::new(Pattern::Check, Size::new(32, 32), Density::new(4).unwrap());
        let img = render(&spec, &luts, TransferKind::Linear).unwrap();
        assert!(img.post_process(PostProcessMode::Clamp).is_none());
        assert_eq!(img.encoded, img.synthesized);
    }

    #[test]
    fn test_degenerate_renders_nothing() {
        let luts = TransferLuts::build();
        let spec = PatternSpec::new(Pattern::Rings, Size::new(8, 8), Density::new(30).unwrap());
        assert!(render(&spec, &luts, TransferKind::SrgbEncode).is_none());
    }
}
