//! Binary drawing surface backed by a tiny-skia pixmap.
//!
//! All drawing is done without anti-aliasing and read back as a boolean
//! grid, so a pixel is either covered or not. Point coordinates are pixel
//! centres; they are shifted by half a pixel into pixmap space, where
//! pixel `i` spans `[i, i + 1)`.

use ndarray::Array2;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::shape::{ImageSize, Point};

pub(crate) struct Canvas {
    pixmap: Pixmap,
    paint: Paint<'static>,
}

#[inline]
fn to_pixmap(p: &Point) -> (f32, f32) {
    (p.x as f32 + 0.5, p.y as f32 + 0.5)
}

impl Canvas {
    /// Returns `None` when the size has a zero dimension or exceeds what a
    /// pixmap can address.
    pub(crate) fn new(size: ImageSize) -> Option<Self> {
        let width = u32::try_from(size.width).ok()?;
        let height = u32::try_from(size.height).ok()?;
        let pixmap = Pixmap::new(width, height)?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 255, 255, 255);
        paint.anti_alias = false;

        Some(Self { pixmap, paint })
    }

    /// Filled disc of radius `r`, boundary included.
    ///
    /// A zero radius marks the pixel under the centre.
    pub(crate) fn disc(&mut self, center: &Point, r: f64) {
        if r.is_nan() || r <= 0.0 {
            self.dot(center);
            return;
        }
        let (cx, cy) = to_pixmap(center);
        if let Some(path) = PathBuilder::from_circle(cx, cy, r as f32) {
            self.fill_and_outline(&path, FillRule::Winding);
        }
    }

    /// Filled axis-aligned rectangle covering the inclusive pixel range
    /// between two opposite corners.
    pub(crate) fn rect(&mut self, a: &Point, b: &Point) {
        // Clamped to one pixel past each edge so huge corners stay finite as f32
        let (w, h) = (f64::from(self.pixmap.width()), f64::from(self.pixmap.height()));
        let (x0, x1) = (a.x.min(b.x).clamp(-1.0, w + 1.0), a.x.max(b.x).clamp(-1.0, w + 1.0));
        let (y0, y1) = (a.y.min(b.y).clamp(-1.0, h + 1.0), a.y.max(b.y).clamp(-1.0, h + 1.0));
        if let Some(rect) = Rect::from_ltrb(x0 as f32, y0 as f32, x1 as f32 + 1.0, y1 as f32 + 1.0)
        {
            self.pixmap
                .fill_rect(rect, &self.paint, Transform::identity(), None);
        }
    }

    /// Stroke of `width` pixels along connected segments.
    pub(crate) fn polyline(&mut self, points: &[Point], width: u32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        let (x, y) = to_pixmap(first);
        pb.move_to(x, y);
        for p in rest {
            let (x, y) = to_pixmap(p);
            pb.line_to(x, y);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        // width 0 is a hairline in tiny-skia
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &self.paint, &stroke, Transform::identity(), None);
    }

    /// Filled closed polygon, even-odd rule, boundary included.
    pub(crate) fn polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        let (x, y) = to_pixmap(first);
        pb.move_to(x, y);
        for p in rest {
            let (x, y) = to_pixmap(p);
            pb.line_to(x, y);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.fill_and_outline(&path, FillRule::EvenOdd);
        }
    }

    /// Marks the single pixel nearest to `p`, if it lies on the canvas.
    pub(crate) fn dot(&mut self, p: &Point) {
        let (col, row) = (p.x.round(), p.y.round());
        if let Some(rect) = Rect::from_xywh(col as f32, row as f32, 1.0, 1.0) {
            self.pixmap
                .fill_rect(rect, &self.paint, Transform::identity(), None);
        }
    }

    fn fill_and_outline(&mut self, path: &tiny_skia::Path, rule: FillRule) {
        // Degenerate (zero-area) paths are skipped by the filler, the
        // outline still marks them.
        self.pixmap
            .fill_path(path, &self.paint, rule, Transform::identity(), None);

        // One pixel wide and centred on the boundary, so pixel centres lying
        // exactly on an edge or vertex are strictly inside the outline.
        let outline = Stroke {
            width: 1.0,
            line_cap: LineCap::Square,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(path, &self.paint, &outline, Transform::identity(), None);
    }

    /// Reads the canvas back as a row-major boolean grid.
    pub(crate) fn into_mask(self) -> Array2<bool> {
        let width = self.pixmap.width() as usize;
        let height = self.pixmap.height() as usize;
        let pixels = self.pixmap.pixels();
        Array2::from_shape_fn((height, width), |(row, col)| {
            pixels[row * width + col].alpha() > 0
        })
    }
}
