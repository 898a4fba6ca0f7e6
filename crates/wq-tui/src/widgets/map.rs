//! Map display widget

use std::collections::{HashMap, HashSet};

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Widget};

use wq_core::StyleOverride;
use wq_data::{MapView, Point, Region, ViewBox};

use crate::display::rgb_color;
use crate::theme::Theme;
use crate::viewport::{Viewport, clip_segment};

/// Widget for rendering the world map
pub struct MapWidget<'a> {
    map: &'a MapView,
    overrides: &'a [StyleOverride],
    locked: &'a [StyleOverride],
    hovered: Option<&'a str>,
    viewport: &'a Viewport,
    theme: &'a Theme,
}

impl<'a> MapWidget<'a> {
    pub fn new(
        map: &'a MapView,
        overrides: &'a [StyleOverride],
        viewport: &'a Viewport,
        theme: &'a Theme,
    ) -> Self {
        Self {
            map,
            overrides,
            locked: &[],
            hovered: None,
            viewport,
            theme,
        }
    }

    /// Regions that are out of play
    pub fn locked(mut self, locked: &'a [StyleOverride]) -> Self {
        self.locked = locked;
        self
    }

    /// Region under the mouse
    pub fn hovered(mut self, id: Option<&'a str>) -> Self {
        self.hovered = id;
        self
    }
}

/// Canvas y grows upwards, map y grows downwards
fn flip(p: Point) -> (f64, f64) {
    (p.x, -p.y)
}

fn draw_outline(ctx: &mut Context<'_>, region: &Region, view: &ViewBox, color: Color) {
    for outline in &region.outlines {
        for (a, b) in outline.edges() {
            if let Some((a, b)) = clip_segment(a, b, view) {
                let (x1, y1) = flip(a);
                let (x2, y2) = flip(b);
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
            }
        }
    }
}

/// Sample the region interior at the canvas dot resolution
fn fill_points(region: &Region, view: &ViewBox, dots_x: u32, dots_y: u32) -> Vec<(f64, f64)> {
    let step_x = view.width / f64::from(dots_x.max(1));
    let step_y = view.height / f64::from(dots_y.max(1));
    let mut coords = Vec::new();

    for outline in &region.outlines {
        let Some((lo, hi)) = outline.bounds() else {
            continue;
        };
        let x0 = lo.x.max(view.min_x);
        let x1 = hi.x.min(view.max_x());
        let y0 = lo.y.max(view.min_y);
        let y1 = hi.y.min(view.max_y());
        if x0 > x1 || y0 > y1 {
            continue;
        }

        // Align samples to the dot grid so fills line up between regions
        let mut y = view.min_y + ((y0 - view.min_y) / step_y).floor() * step_y + step_y / 2.0;
        while y <= y1 {
            let mut x = view.min_x + ((x0 - view.min_x) / step_x).floor() * step_x + step_x / 2.0;
            while x <= x1 {
                let p = Point::new(x, y);
                if outline.contains(p) {
                    coords.push(flip(p));
                }
                x += step_x;
            }
            y += step_y;
        }
    }
    coords
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(self.map.name.as_str())
            .title_style(Style::default().fg(self.theme.text));
        let inner = block.inner(area);

        let view = self.viewport.visible();
        let fills: HashMap<&str, Color> = self
            .locked
            .iter()
            .chain(self.overrides)
            .map(|o| (o.region_id.as_str(), rgb_color(o.fill)))
            .collect();
        let locked: HashSet<&str> = self.locked.iter().map(|o| o.region_id.as_str()).collect();

        // Braille cells are 2 dots wide and 4 dots tall
        let dots_x = u32::from(inner.width) * 2;
        let dots_y = u32::from(inner.height) * 4;
        let filled: Vec<(Vec<(f64, f64)>, Color)> = self
            .map
            .regions
            .iter()
            .filter_map(|region| {
                let color = *fills.get(region.id.as_str())?;
                Some((fill_points(region, &view, dots_x, dots_y), color))
            })
            .collect();

        let theme = self.theme;
        let hovered = self.hovered;
        Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([view.min_x, view.max_x()])
            .y_bounds([-view.max_y(), -view.min_y])
            .paint(|ctx| {
                for (coords, color) in &filled {
                    ctx.draw(&Points {
                        coords,
                        color: *color,
                    });
                }
                ctx.layer();
                for region in &self.map.regions {
                    let id = region.id.as_str();
                    let color = if locked.contains(id) {
                        theme.region_locked
                    } else if let Some(fill) = fills.get(id) {
                        *fill
                    } else if hovered == Some(id) {
                        theme.region_hover
                    } else {
                        theme.region
                    };
                    draw_outline(ctx, region, &view, color);
                }
            })
            .render(area, buf);
    }
}
