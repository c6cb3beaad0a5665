//! Procedural icon rendering
//!
//! An icon is built in three layers: a rounded-square background (flat or
//! gradient, clipped by an 8-bit coverage mask), the letterform strokes, and
//! finally the sparkles so they always sit on top.

use crate::{
    design::{Background, IconSpec, Sparkle, LOGICAL_SIZE, MAX_SIZE, STROKE_WIDTH},
    error::IconError,
};
use image::{imageops, GrayImage, ImageBuffer, Luma, Rgba, RgbaImage};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use tiny_skia::{
    ColorU8, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

/// A position in output pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn distance_to(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Corner radius of the background square, the same proportion at every size.
pub fn corner_radius(size: u32) -> u32 {
    size / 5
}

/// Build a grayscale coverage mask for a rounded rectangle filling the whole image.
///
/// The radius is clamped to half the smaller dimension. Edge pixels get partial
/// coverage; pixels whose center lies half a pixel or more outside the shape are 0.
pub fn rounded_rect_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let radius = radius.min(width.min(height) / 2) as f32;
    let half_width = width as f32 / 2.0;
    let half_height = height as f32 / 2.0;

    ImageBuffer::from_fn(width, height, |x, y| {
        // Signed distance from the pixel center to the rounded outline
        let qx = (x as f32 + 0.5 - half_width).abs() - (half_width - radius);
        let qy = (y as f32 + 0.5 - half_height).abs() - (half_height - radius);
        let distance = qx.max(0.0).hypot(qy.max(0.0)) + qx.max(qy).min(0.0) - radius;

        let coverage = (0.5 - distance).clamp(0.0, 1.0);
        Luma([(coverage * 255.0).round() as u8])
    })
}

/// Fill an image with a gradient running from `start` at the top left pixel to
/// `end` at the bottom right pixel, blending on `x + y`.
pub fn diagonal_gradient(width: u32, height: u32, start: Rgba<u8>, end: Rgba<u8>) -> RgbaImage {
    let span = (width + height).saturating_sub(2) as f32;

    ImageBuffer::from_fn(width, height, |x, y| {
        let mix = if span > 0.0 {
            (x + y) as f32 / span
        } else {
            0.0
        };
        lerp(start, end, mix)
    })
}

fn lerp(start: Rgba<u8>, end: Rgba<u8>, mix: f32) -> Rgba<u8> {
    let mut pixel = [0u8; 4];
    for (channel, (&from, &to)) in pixel.iter_mut().zip(start.0.iter().zip(end.0.iter())) {
        let (from, to) = (from as f32, to as f32);
        *channel = (from + (to - from) * mix).round() as u8;
    }
    Rgba(pixel)
}

/// Build the rounded-square background of a `size` x `size` icon.
pub fn build_background(size: u32, background: &Background, radius: u32) -> RgbaImage {
    let mut fill = match *background {
        Background::Flat(color) => RgbaImage::from_pixel(size, size, color),
        Background::Gradient { start, end } => diagonal_gradient(size, size, start, end),
    };

    let mask = rounded_rect_mask(size, size, radius);
    for (pixel, coverage) in fill.pixels_mut().zip(mask.pixels()) {
        pixel[3] = ((pixel[3] as u16 * coverage[0] as u16 + 127) / 255) as u8;
    }

    fill
}

/// Maps the 24 unit design grid onto an icon of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeLayout {
    pub size: u32,
    pub content_fraction: f32,
    pub bias: (f32, f32),
}

impl StrokeLayout {
    pub fn new(size: u32, spec: &IconSpec) -> Self {
        Self {
            size,
            content_fraction: spec.content_fraction,
            bias: spec.bias,
        }
    }

    /// Pixels per logical unit, identical on both axes.
    pub fn scale(&self) -> f32 {
        self.size as f32 * self.content_fraction / LOGICAL_SIZE
    }

    /// Top left corner of the design box in pixels.
    pub fn offset(&self) -> Point {
        let size = self.size as f32;
        let margin = (size - size * self.content_fraction) / 2.0;
        Point {
            x: margin + self.bias.0 * size,
            y: margin + self.bias.1 * size,
        }
    }

    pub fn map(&self, (x, y): (f32, f32)) -> Point {
        let offset = self.offset();
        let scale = self.scale();
        Point {
            x: offset.x + x * scale,
            y: offset.y + y * scale,
        }
    }

    /// Never thinner than one pixel, so the strokes survive at 16px.
    pub fn stroke_width(&self) -> f32 {
        (STROKE_WIDTH * self.scale()).max(1.0)
    }
}

/// Vertices of a sparkle: outer points on the four cardinal directions
/// alternating with inner points on the diagonals, starting at the top.
pub fn sparkle_polygon(size: u32, sparkle: &Sparkle) -> [Point; 8] {
    let size = size as f32;
    let center_x = sparkle.center.0 * size;
    let center_y = sparkle.center.1 * size;
    let outer = sparkle.radius * size;
    let inner = outer * sparkle.pull_in;

    std::array::from_fn(|i| {
        let angle = i as f32 * FRAC_PI_4 - FRAC_PI_2;
        let distance = if i % 2 == 0 { outer } else { inner };
        Point {
            x: center_x + distance * angle.cos(),
            y: center_y + distance * angle.sin(),
        }
    })
}

/// Reject sizes that are empty or larger than [`MAX_SIZE`], before any buffer is allocated.
pub fn check_size(size: u32) -> Result<(), IconError> {
    if size == 0 || size > MAX_SIZE {
        return Err(IconError::DegenerateGeometry { size });
    }
    Ok(())
}

/// Render one icon of `size` x `size` pixels.
pub fn render_icon(size: u32, spec: &IconSpec) -> Result<RgbaImage, IconError> {
    check_size(size)?;

    let mut icon = build_background(size, &spec.background, corner_radius(size));

    let mut overlay = Pixmap::new(size, size).ok_or(IconError::DegenerateGeometry { size })?;
    let paint = solid_paint(spec.foreground);

    let layout = StrokeLayout::new(size, spec);
    draw_strokes(&mut overlay, &layout, spec.strokes, &paint);

    for sparkle in spec.sparkles {
        fill_polygon(&mut overlay, &sparkle_polygon(size, sparkle), &paint);
    }

    imageops::overlay(&mut icon, &pixmap_to_image(&overlay), 0, 0);
    Ok(icon)
}

fn solid_paint(color: Rgba<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;
    paint
}

fn draw_strokes(
    pixmap: &mut Pixmap,
    layout: &StrokeLayout,
    strokes: &[&[(f32, f32)]],
    paint: &Paint,
) {
    let stroke = Stroke {
        width: layout.stroke_width(),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    for points in strokes {
        let mut points = points.iter().map(|&point| layout.map(point));
        let Some(first) = points.next() else {
            continue;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for point in points {
            pb.line_to(point.x, point.y);
        }

        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, paint, &stroke, Transform::identity(), None);
        }
    }
}

fn fill_polygon(pixmap: &mut Pixmap, vertices: &[Point], paint: &Paint) {
    let Some((first, rest)) = vertices.split_first() else {
        return;
    };

    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for vertex in rest {
        pb.line_to(vertex.x, vertex.y);
    }
    pb.close();

    if let Some(path) = pb.finish() {
        pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    }
}

// tiny-skia stores premultiplied pixels
fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    ImageBuffer::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        let color = pixmap
            .pixel(x, y)
            .map(|pixel| pixel.demultiply())
            .unwrap_or(ColorU8::from_rgba(0, 0, 0, 0));
        Rgba([color.red(), color.green(), color.blue(), color.alpha()])
    })
}
