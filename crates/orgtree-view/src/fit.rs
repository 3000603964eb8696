//! Fit-to-viewport camera math.
//!
//! The fit transform is a pure function of the visible extents, the viewport and the config:
//! no history is kept, so identical inputs always produce identical transforms.

use crate::config::ViewConfig;
use crate::geom::{Point, Transform, point, vector};
use crate::model::{Bounds, FitTransform, NodeExtent, Viewport};

/// Clamps `raw` into `[lo, hi]`, mapping NaN to `lo` and tolerating an inverted range.
fn clamp_scale(raw: f64, lo: f64, hi: f64) -> f64 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let scale = raw.max(lo).min(hi);
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Fits the bounding box of `extents` into `viewport`.
///
/// `scale = min((vw - padding) / box_w, (vh - padding) / box_h)`, clamped to the config's fit
/// range, with the box centre mapped to the viewport centre and then lifted by
/// `vertical_bias`. Box dimensions below `min_extent` are raised to it, so a single card or a
/// zero-size point never divides by zero. An empty extent set places the world origin at the
/// viewport centre at the fit range's upper scale.
pub fn compute_fit_transform(
    extents: &[NodeExtent],
    viewport: Viewport,
    config: &ViewConfig,
) -> FitTransform {
    let size = viewport.sanitized();
    let center = viewport.center();

    let Some(bounds) = Bounds::from_extents(extents) else {
        let scale = clamp_scale(config.fit_max_scale, config.fit_min_scale, config.fit_max_scale);
        return FitTransform {
            translate_x: center.x,
            translate_y: center.y - config.vertical_bias,
            scale,
        };
    };

    let min_extent = if config.min_extent.is_finite() && config.min_extent > 0.0 {
        config.min_extent
    } else {
        1.0
    };
    let box_w = bounds.width().max(min_extent);
    let box_h = bounds.height().max(min_extent);

    let raw = ((size.width - config.padding) / box_w).min((size.height - config.padding) / box_h);
    let scale = clamp_scale(raw, config.fit_min_scale, config.fit_max_scale);

    let box_center = bounds.center();
    FitTransform {
        translate_x: center.x - box_center.x * scale,
        translate_y: center.y - box_center.y * scale - config.vertical_bias,
        scale,
    }
}

impl FitTransform {
    /// Maps a world point to screen space.
    pub fn apply(&self, p: Point) -> Point {
        point(
            p.x * self.scale + self.translate_x,
            p.y * self.scale + self.translate_y,
        )
    }

    /// Maps a screen point back to world space.
    pub fn invert(&self, p: Point) -> Point {
        point(
            (p.x - self.translate_x) / self.scale,
            (p.y - self.translate_y) / self.scale,
        )
    }

    pub fn to_transform(&self) -> Transform {
        Transform::scale(self.scale, self.scale)
            .then_translate(vector(self.translate_x, self.translate_y))
    }

    /// Multiplies the scale by `factor`, clamped to the interaction range, keeping the world
    /// point under the viewport centre fixed. Non-positive or non-finite factors are ignored.
    pub fn zoom_by(&self, factor: f64, viewport: Viewport, config: &ViewConfig) -> Self {
        if !(factor.is_finite() && factor > 0.0) {
            return *self;
        }
        let scale = clamp_scale(self.scale * factor, config.min_scale, config.max_scale);
        if (scale - self.scale).abs() <= f64::EPSILON {
            return *self;
        }
        let anchor = viewport.center();
        let world = self.invert(anchor);
        Self {
            translate_x: anchor.x - world.x * scale,
            translate_y: anchor.y - world.y * scale,
            scale,
        }
    }

    pub fn zoom_in(&self, viewport: Viewport, config: &ViewConfig) -> Self {
        self.zoom_by(config.zoom_in_factor, viewport, config)
    }

    pub fn zoom_out(&self, viewport: Viewport, config: &ViewConfig) -> Self {
        self.zoom_by(config.zoom_out_factor, viewport, config)
    }

    pub fn pan_by(&self, dx: f64, dy: f64) -> Self {
        if !(dx.is_finite() && dy.is_finite()) {
            return *self;
        }
        Self {
            translate_x: self.translate_x + dx,
            translate_y: self.translate_y + dy,
            scale: self.scale,
        }
    }
}
