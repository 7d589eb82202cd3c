//! Particle kinematics for the decorative background.
//!
//! Particles drift at a constant velocity over a toroidal surface: leaving
//! one edge re-enters from the opposite edge. Positions stay inside
//! `[0, width) × [0, height)` after every step, including after a resize.

#[cfg(test)]
#[path = "particles_test.rs"]
mod particles_test;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::BackdropConfig;
use crate::theme::Theme;

/// 8-bit RGB color with a fractional alpha, rendered as CSS `rgba(...)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// The two particle colors used for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette(pub [Rgba; 2]);

impl Palette {
    pub const LIGHT: Self = Self([Rgba::new(0, 123, 255, 0.3), Rgba::new(102, 16, 242, 0.3)]);
    pub const DARK: Self = Self([Rgba::new(0, 243, 255, 0.3), Rgba::new(112, 0, 255, 0.3)]);

    /// Either color with equal probability.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgba {
        if rng.random_bool(0.5) { self.0[0] } else { self.0[1] }
    }

    #[must_use]
    pub fn contains(&self, color: &Rgba) -> bool {
        self.0.contains(color)
    }
}

/// Drawable area in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half-open containment: `[0, width) × [0, height)`.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }
}

/// Wrap `value` into `[0, extent)`. Degenerate extents collapse to `0`.
#[must_use]
pub fn wrap(value: f64, extent: f64) -> f64 {
    if !extent.is_finite() || extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub color: Rgba,
}

impl Particle {
    /// Uniform position in `bounds`, uniform velocity in
    /// `[-max_speed, max_speed)`, uniform radius in `[0, max_radius)`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds, palette: &Palette, config: &BackdropConfig) -> Self {
        Self {
            x: wrap(rng.random::<f64>() * bounds.width, bounds.width),
            y: wrap(rng.random::<f64>() * bounds.height, bounds.height),
            vx: (rng.random::<f64>() - 0.5) * 2.0 * config.max_speed,
            vy: (rng.random::<f64>() - 0.5) * 2.0 * config.max_speed,
            radius: rng.random::<f64>() * config.max_radius,
            color: palette.pick(rng),
        }
    }

    /// Move one frame and wrap around the edges.
    pub fn advance(&mut self, bounds: Bounds) {
        self.x = wrap(self.x + self.vx, bounds.width);
        self.y = wrap(self.y + self.vy, bounds.height);
    }
}

/// One generation of particles sharing a surface and a theme.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    theme: Theme,
}

impl ParticleField {
    /// Fresh field of `config.particle_count` particles for `theme`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds, theme: Theme, config: &BackdropConfig) -> Self {
        let palette = config.palette(theme);
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(rng, bounds, palette, config))
            .collect();
        Self { particles, bounds, theme }
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            particle.advance(bounds);
        }
    }

    /// Adopt new surface bounds, keeping every particle and re-wrapping
    /// positions that now fall outside.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        for particle in &mut self.particles {
            particle.x = wrap(particle.x, bounds.width);
            particle.y = wrap(particle.y, bounds.height);
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
