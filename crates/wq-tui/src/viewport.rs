//! Zoom and pan over the map
//!
//! The viewport is a zoomed window onto the dataset's viewBox. It never
//! leaves the viewBox, so panning stops at the map edges.

use ratatui::layout::Rect;
use tracing::debug;
use wq_data::{Point, ViewBox};

use crate::input::PanDirection;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 16.0;
const ZOOM_STEP: f64 = 1.5;
/// Fraction of the visible size moved by one pan step
const PAN_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    base: ViewBox,
    zoom: f64,
    center: Point,
}

impl Viewport {
    pub fn new(base: ViewBox) -> Self {
        Self {
            base,
            zoom: MIN_ZOOM,
            center: base.center(),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// The part of the map currently on screen
    pub fn visible(&self) -> ViewBox {
        let width = self.base.width / self.zoom;
        let height = self.base.height / self.zoom;
        ViewBox {
            min_x: self.center.x - width / 2.0,
            min_y: self.center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.base);
    }

    pub fn pan(&mut self, direction: PanDirection) {
        let visible = self.visible();
        let (dx, dy) = match direction {
            PanDirection::Up => (0.0, -visible.height * PAN_STEP),
            PanDirection::Down => (0.0, visible.height * PAN_STEP),
            PanDirection::Left => (-visible.width * PAN_STEP, 0.0),
            PanDirection::Right => (visible.width * PAN_STEP, 0.0),
        };
        self.center = Point::new(self.center.x + dx, self.center.y + dy);
        self.clamp_center();
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp_center();
        debug!(zoom = self.zoom, "viewport zoom");
    }

    fn clamp_center(&mut self) {
        let half_w = self.base.width / self.zoom / 2.0;
        let half_h = self.base.height / self.zoom / 2.0;
        self.center.x = clamp_or_mid(
            self.center.x,
            self.base.min_x + half_w,
            self.base.max_x() - half_w,
        );
        self.center.y = clamp_or_mid(
            self.center.y,
            self.base.min_y + half_h,
            self.base.max_y() - half_h,
        );
    }

    /// Map coordinate under a terminal cell of `area`, or `None` if the
    /// cell is outside it
    pub fn screen_to_map(&self, area: Rect, column: u16, row: u16) -> Option<Point> {
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }
        let visible = self.visible();
        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        Some(Point::new(
            visible.min_x + fx * visible.width,
            visible.min_y + fy * visible.height,
        ))
    }
}

/// `f64::clamp` panics when rounding leaves `lo` a hair above `hi`
fn clamp_or_mid(value: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        value.clamp(lo, hi)
    }
}

/// Clip a segment to a view box (Liang-Barsky). Returns `None` when the
/// segment lies entirely outside.
pub fn clip_segment(a: Point, b: Point, view: &ViewBox) -> Option<(Point, Point)> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    let checks = [
        (-dx, a.x - view.min_x),
        (dx, view.max_x() - a.x),
        (-dy, a.y - view.min_y),
        (dy, view.max_y() - a.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        Point::new(a.x + t0 * dx, a.y + t0 * dy),
        Point::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}
