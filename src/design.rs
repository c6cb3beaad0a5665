//! Design tables for the translate icon
//!
//! The letterforms are authored on a 24x24 logical grid and scaled to every
//! output size by the renderer. Sparkles are placed directly in fractions of
//! the output size so they keep their position at every scale.

use image::Rgba;

/// Sizes the extension ships with.
pub const DEFAULT_SIZES: [u32; 3] = [16, 48, 128];

/// Largest edge rendered or resampled; bigger requests fail for that icon alone.
pub const MAX_SIZE: u32 = 4096;

/// Edge length of the logical design grid.
pub const LOGICAL_SIZE: f32 = 24.0;

/// Stroke width in logical units.
pub const STROKE_WIDTH: f32 = 2.0;

pub const FOREGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const FLAT_BACKGROUND: Rgba<u8> = Rgba([66, 133, 244, 255]);
pub const GRADIENT_START: Rgba<u8> = Rgba([79, 70, 229, 255]);
pub const GRADIENT_END: Rgba<u8> = Rgba([6, 182, 212, 255]);

/// "A" with a glyph crossing it: the usual translate mark.
///
/// Each entry is one poly-line in logical coordinates.
pub const GLYPH_STROKES: &[&[(f32, f32)]] = &[
    &[(5.0, 8.0), (11.0, 14.0)],
    &[(4.0, 14.0), (10.0, 8.0), (12.0, 5.0)],
    &[(2.0, 5.0), (14.0, 5.0)],
    &[(7.0, 2.0), (8.0, 2.0)],
    &[(22.0, 22.0), (17.0, 12.0), (12.0, 22.0)],
    &[(14.0, 18.0), (20.0, 18.0)],
];

const AI_SPARKLES: &[Sparkle] = &[
    Sparkle {
        center: (0.76, 0.24),
        radius: 0.13,
        pull_in: 0.28,
    },
    Sparkle {
        center: (0.88, 0.40),
        radius: 0.065,
        pull_in: 0.25,
    },
];

/// How the rounded square behind the glyph is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Flat(Rgba<u8>),
    /// Blends from `start` in the top left corner to `end` in the bottom right.
    Gradient { start: Rgba<u8>, end: Rgba<u8> },
}

/// A four-pointed star, positioned in fractions of the icon size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub center: (f32, f32),
    pub radius: f32,
    /// Distance of the inner vertices as a fraction of `radius`.
    pub pull_in: f32,
}

/// One complete icon design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSpec {
    pub background: Background,
    pub foreground: Rgba<u8>,
    /// Share of the icon edge covered by the 24 unit design box.
    pub content_fraction: f32,
    /// Shift of the design box from center, in fractions of the icon size.
    pub bias: (f32, f32),
    pub strokes: &'static [&'static [(f32, f32)]],
    pub sparkles: &'static [Sparkle],
}

/// The named icon variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Preset {
    /// Plain rounded square.
    Flat,
    /// Diagonal gradient rounded square.
    Gradient,
    /// Gradient with sparkles, for the AI-assisted build.
    #[default]
    GradientSparkle,
}

impl Preset {
    pub fn spec(self) -> IconSpec {
        match self {
            Preset::Flat => IconSpec {
                background: Background::Flat(FLAT_BACKGROUND),
                foreground: FOREGROUND,
                content_fraction: 0.6,
                bias: (0.0, 0.0),
                strokes: GLYPH_STROKES,
                sparkles: &[],
            },
            Preset::Gradient => IconSpec {
                background: Background::Gradient {
                    start: GRADIENT_START,
                    end: GRADIENT_END,
                },
                foreground: FOREGROUND,
                content_fraction: 0.6,
                bias: (0.0, 0.0),
                strokes: GLYPH_STROKES,
                sparkles: &[],
            },
            Preset::GradientSparkle => IconSpec {
                background: Background::Gradient {
                    start: GRADIENT_START,
                    end: GRADIENT_END,
                },
                foreground: FOREGROUND,
                content_fraction: 0.55,
                bias: (-0.05, 0.05),
                strokes: GLYPH_STROKES,
                sparkles: AI_SPARKLES,
            },
        }
    }
}
