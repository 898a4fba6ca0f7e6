//! End-of-game confetti

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::prelude::*;
use ratatui::widgets::Widget;

use crate::theme::Theme;

const GLYPHS: [char; 5] = ['*', '+', '.', 'o', '~'];
const SPAWN_PER_TICK: usize = 3;
const GRAVITY: f32 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub glyph: char,
    /// Index into the theme's confetti colors
    pub color: usize,
}

/// Falling confetti particles, in cell coordinates relative to the frame
#[derive(Debug, Clone)]
pub struct Confetti {
    rng: SmallRng,
    particles: Vec<Particle>,
    running: bool,
}

impl Confetti {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            particles: Vec::new(),
            running: false,
        }
    }

    /// Start spawning. Particles appear on the following ticks and keep
    /// coming for as long as the app runs.
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn is_active(&self) -> bool {
        self.running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance one animation frame inside `area`
    pub fn tick(&mut self, area: Rect) {
        if area.width == 0 || area.height == 0 {
            self.particles.clear();
            return;
        }

        if self.running {
            for _ in 0..SPAWN_PER_TICK {
                let particle = Particle {
                    x: self.rng.gen_range(0.0..f32::from(area.width)),
                    y: 0.0,
                    vx: self.rng.gen_range(-0.3..0.3),
                    vy: self.rng.gen_range(0.2..0.8),
                    glyph: GLYPHS[self.rng.gen_range(0..GLYPHS.len())],
                    color: self.rng.gen_range(0..6),
                };
                self.particles.push(particle);
            }
        }

        let width = f32::from(area.width);
        let height = f32::from(area.height);
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += GRAVITY;
        }
        self.particles
            .retain(|p| p.y < height && p.x >= 0.0 && p.x < width);
    }
}

/// Paints the particles over whatever is already in the buffer
pub struct ConfettiWidget<'a> {
    confetti: &'a Confetti,
    theme: &'a Theme,
}

impl<'a> ConfettiWidget<'a> {
    pub fn new(confetti: &'a Confetti, theme: &'a Theme) -> Self {
        Self { confetti, theme }
    }
}

impl Widget for ConfettiWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for p in self.confetti.particles() {
            let x = area.x + p.x as u16;
            let y = area.y + p.y as u16;
            if x >= area.right() || y >= area.bottom() {
                continue;
            }
            let color = self.theme.confetti[p.color % self.theme.confetti.len()];
            buf[(x, y)].set_char(p.glyph).set_fg(color);
        }
    }
}
