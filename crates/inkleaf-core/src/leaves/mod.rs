//! Decorative falling-leaf particles.
//!
//! A [`LeafField`] holds a fixed number of [`Leaf`] records sized for the
//! current viewport class. Leaves never die: once one drifts past the
//! bottom (or a side) it wraps around with a fresh horizontal position.

mod animator;

pub use animator::{FrameScheduler, LeafAnimator, RunState};

use heapless::Vec as HeaplessVec;
use rand::{Rng, RngCore};

use crate::viewport::ViewportClass;

/// Hard upper bound on leaves alive at once.
pub const MAX_LEAVES: usize = 20;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Dried-leaf browns.
pub const LEAF_PALETTE: [Rgb; 4] = [
    Rgb::new(122, 82, 48),
    Rgb::new(139, 90, 43),
    Rgb::new(160, 82, 45),
    Rgb::new(101, 67, 33),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafConfig {
    pub narrow_count: usize,
    pub wide_count: usize,
    pub min_size: f64,
    pub max_size: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Degrees per frame, symmetric around zero.
    pub max_rotation_speed: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Pixels per frame, symmetric around zero.
    pub max_drift: f64,
    pub drift_factor: f64,
    pub sway_amplitude: f64,
    pub sway_frequency: f64,
    pub wrap_margin: f64,
    /// Leaves larger than this get a stem.
    pub stem_min_size: f64,
}

impl Default for LeafConfig {
    fn default() -> Self {
        Self {
            narrow_count: 8,
            wide_count: 15,
            min_size: 3.0,
            max_size: 8.0,
            min_speed: 0.4,
            max_speed: 1.6,
            max_rotation_speed: 1.0,
            min_opacity: 0.2,
            max_opacity: 0.6,
            max_drift: 0.6,
            drift_factor: 0.3,
            sway_amplitude: 0.3,
            sway_frequency: 0.01,
            wrap_margin: 10.0,
            stem_min_size: 6.0,
        }
    }
}

impl LeafConfig {
    pub const fn with_counts(mut self, narrow_count: usize, wide_count: usize) -> Self {
        self.narrow_count = narrow_count;
        self.wide_count = wide_count;
        self
    }

    pub const fn with_sway(mut self, sway_amplitude: f64) -> Self {
        self.sway_amplitude = sway_amplitude;
        self
    }

    /// Leaf count for a viewport class, capped at [`MAX_LEAVES`].
    pub fn count_for(&self, class: ViewportClass) -> usize {
        let count = match class {
            ViewportClass::Narrow => self.narrow_count,
            ViewportClass::Wide => self.wide_count,
        };
        count.min(MAX_LEAVES)
    }
}

/// One falling leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leaf {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    /// Degrees.
    pub rotation: f64,
    pub rotation_speed: f64,
    pub opacity: f64,
    pub drift: f64,
    pub phase: f64,
    pub color: Rgb,
}

/// Everything a surface needs to paint one leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafPaint {
    pub x: f64,
    pub y: f64,
    pub rotation_rad: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub alpha: f64,
    pub color: Rgb,
    pub stem_len: Option<f64>,
}

/// Drawing target for the leaf field (a 2D canvas in the browser).
pub trait LeafSurface {
    fn clear(&mut self, width: f64, height: f64);
    fn paint(&mut self, leaf: &LeafPaint);
}

impl Leaf {
    /// Random leaf anywhere inside `width` x `height`.
    pub fn spawn<R: RngCore + ?Sized>(rng: &mut R, config: &LeafConfig, width: f64, height: f64) -> Self {
        let mut leaf = Self::spawn_at_top(rng, config, width);
        leaf.y = rng.gen_range(0.0..height.max(1.0));
        leaf
    }

    /// Random leaf just above the visible area.
    pub fn spawn_at_top<R: RngCore + ?Sized>(rng: &mut R, config: &LeafConfig, width: f64) -> Self {
        let color = LEAF_PALETTE[rng.gen_range(0..LEAF_PALETTE.len())];
        Self {
            x: rng.gen_range(0.0..width.max(1.0)),
            y: -config.wrap_margin,
            size: rng.gen_range(config.min_size..=config.max_size),
            speed: rng.gen_range(config.min_speed..=config.max_speed),
            rotation: rng.gen_range(0.0..360.0),
            rotation_speed: rng.gen_range(-config.max_rotation_speed..=config.max_rotation_speed),
            opacity: rng.gen_range(config.min_opacity..=config.max_opacity),
            drift: rng.gen_range(-config.max_drift..=config.max_drift),
            phase: rng.gen_range(0.0..core::f64::consts::TAU),
            color,
        }
    }

    /// Move one frame forward and wrap at the edges.
    pub fn advance<R: RngCore + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &LeafConfig,
        width: f64,
        height: f64,
    ) {
        let sway = (self.y * config.sway_frequency + self.phase).sin() * config.sway_amplitude;
        self.y += self.speed;
        self.x += self.drift * config.drift_factor + sway;
        self.rotation = (self.rotation + self.rotation_speed).rem_euclid(360.0);

        let margin = config.wrap_margin;
        if self.y > height + margin {
            self.y = -margin;
            self.x = rng.gen_range(0.0..width.max(1.0));
        }
        if self.x > width + margin {
            self.x = -margin;
        } else if self.x < -margin {
            self.x = width + margin;
        }
    }

    pub fn paint(&self, config: &LeafConfig) -> LeafPaint {
        LeafPaint {
            x: self.x,
            y: self.y,
            rotation_rad: self.rotation.to_radians(),
            radius_x: self.size,
            radius_y: self.size * 1.4,
            alpha: self.opacity,
            color: self.color,
            stem_len: (self.size > config.stem_min_size).then_some(self.size * 0.6),
        }
    }
}

/// Fixed-size leaf collection bound to a canvas size.
#[derive(Clone, Debug)]
pub struct LeafField {
    config: LeafConfig,
    leaves: HeaplessVec<Leaf, MAX_LEAVES>,
    width: f64,
    height: f64,
}

impl LeafField {
    pub fn new<R: RngCore + ?Sized>(config: LeafConfig, width: f64, height: f64, rng: &mut R) -> Self {
        let mut field = Self {
            config,
            leaves: HeaplessVec::new(),
            width,
            height,
        };
        field.respawn(rng);
        field
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn class(&self) -> ViewportClass {
        ViewportClass::from_width(self.width)
    }

    pub fn target_count(&self) -> usize {
        self.config.count_for(self.class())
    }

    /// Adopt a new canvas size. Returns `true` when the collection was
    /// rebuilt because the target count changed.
    pub fn resize<R: RngCore + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) -> bool {
        self.width = width;
        self.height = height;
        if self.leaves.len() == self.target_count() {
            return false;
        }
        self.respawn(rng);
        true
    }

    pub fn step<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        let (width, height) = (self.width, self.height);
        for leaf in self.leaves.iter_mut() {
            leaf.advance(rng, &self.config, width, height);
        }
    }

    pub fn draw<S: LeafSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.width, self.height);
        for leaf in &self.leaves {
            surface.paint(&leaf.paint(&self.config));
        }
    }

    fn respawn<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        self.leaves.clear();
        for _ in 0..self.target_count() {
            let leaf = Leaf::spawn(rng, &self.config, self.width, self.height);
            if self.leaves.push(leaf).is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn field_size_follows_viewport_class() {
        let mut rng = rng();
        let mut field = LeafField::new(LeafConfig::default(), 400.0, 800.0, &mut rng);
        assert_eq!(field.len(), 8);

        assert!(field.resize(1280.0, 800.0, &mut rng));
        assert_eq!(field.len(), 15);

        // Same class, different size: collection kept.
        assert!(!field.resize(1440.0, 900.0, &mut rng));
        assert_eq!(field.len(), 15);

        assert!(field.resize(767.0, 900.0, &mut rng));
        assert_eq!(field.len(), 8);
    }

    #[test]
    fn counts_are_capped() {
        let config = LeafConfig::default().with_counts(50, 50);
        let field = LeafField::new(config, 1000.0, 500.0, &mut rng());
        assert_eq!(field.len(), MAX_LEAVES);
    }

    #[test]
    fn spawned_leaves_respect_ranges() {
        let config = LeafConfig::default();
        let mut rng = rng();
        for _ in 0..100 {
            let leaf = Leaf::spawn(&mut rng, &config, 300.0, 200.0);
            assert!((0.0..300.0).contains(&leaf.x));
            assert!((0.0..200.0).contains(&leaf.y));
            assert!((3.0..=8.0).contains(&leaf.size));
            assert!((0.2..=0.6).contains(&leaf.opacity));
            assert!(LEAF_PALETTE.contains(&leaf.color));
        }
    }

    #[test]
    fn leaf_wraps_to_top_after_leaving_bottom() {
        let config = LeafConfig::default().with_sway(0.0);
        let mut rng = rng();
        let mut leaf = Leaf::spawn(&mut rng, &config, 300.0, 200.0);
        leaf.y = 209.5;
        leaf.speed = 1.0;
        leaf.drift = 0.0;
        leaf.advance(&mut rng, &config, 300.0, 200.0);

        assert_eq!(leaf.y, -10.0);
        assert!((0.0..300.0).contains(&leaf.x));
    }

    #[test]
    fn leaf_wraps_horizontally() {
        let config = LeafConfig::default().with_sway(0.0);
        let mut rng = rng();
        let mut leaf = Leaf::spawn(&mut rng, &config, 300.0, 200.0);
        leaf.y = 50.0;
        leaf.x = 310.0;
        leaf.drift = 0.6;
        leaf.advance(&mut rng, &config, 300.0, 200.0);
        assert_eq!(leaf.x, -10.0);

        leaf.x = -9.95;
        leaf.drift = -0.6;
        leaf.advance(&mut rng, &config, 300.0, 200.0);
        assert_eq!(leaf.x, 310.0);
    }

    #[test]
    fn only_large_leaves_get_stems() {
        let config = LeafConfig::default();
        let mut leaf = Leaf::spawn(&mut rng(), &config, 100.0, 100.0);
        leaf.size = 4.0;
        assert_eq!(leaf.paint(&config).stem_len, None);
        leaf.size = 7.0;
        let paint = leaf.paint(&config);
        assert!(paint.stem_len.is_some());
        assert_eq!(paint.radius_y, 7.0 * 1.4);
    }
}
