use cgmath::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::color::BurstPalette;
use crate::config::{BurstParams, ParticleParams};
use crate::particle::Particle;
use crate::surface::Surface;

/// The live particle collection and the surface it is drawn onto.
pub struct Fireworks {
    pub width: f32,
    pub height: f32,
    pub burst: BurstParams,
    pub particle_params: ParticleParams,
    particles: Vec<Particle>,
    rng: StdRng,
    ticks: u64,
}

impl Fireworks {
    pub fn new(width: f32, height: f32, burst: BurstParams, particle_params: ParticleParams) -> Self {
        Self::with_rng(width, height, burst, particle_params, StdRng::from_entropy())
    }

    pub fn with_rng(
        width: f32,
        height: f32,
        burst: BurstParams,
        particle_params: ParticleParams,
        rng: StdRng,
    ) -> Self {
        Self {
            width,
            height,
            burst,
            particle_params,
            particles: Vec::new(),
            rng,
            ticks: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Adds one burst at `(x, y)`. Out-of-bounds origins are allowed; those
    /// sparks simply fly off-screen.
    pub fn spawn(&mut self, x: f32, y: f32) {
        let origin = Point2::new(x, y);
        let palette = BurstPalette::roll(&mut self.rng);
        self.particles.reserve(self.burst.particles_per_burst);
        for _ in 0..self.burst.particles_per_burst {
            let color = palette.pick(&mut self.rng);
            let particle = Particle::spawn(origin, color, &self.particle_params, &mut self.rng);
            self.particles.push(particle);
        }
        log::debug!(
            "Burst at ({:.1}, {:.1}), hue {:.0}, {} live",
            x,
            y,
            palette.hue(),
            self.particles.len()
        );
    }

    /// Spawns somewhere in the upper part of the surface.
    pub fn spawn_ambient(&mut self) {
        let x = sample(&mut self.rng, self.width);
        let y = sample(&mut self.rng, self.height * self.burst.ambient_height_fraction);
        self.spawn(x, y);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn tick(&mut self, surface: &mut dyn Surface) {
        surface.clear(self.width, self.height);

        // Updates are independent per particle; drawing keeps collection order.
        self.particles.par_iter_mut().for_each(Particle::update);
        for particle in &self.particles {
            particle.render(surface);
        }

        self.particles.retain(Particle::is_alive);
        self.ticks += 1;
    }
}

// Uniform in [0, extent), or 0 for an empty extent.
fn sample<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::FireworkColor;
    use crate::surface::{DisplayList, DrawCommand};

    fn fireworks(seed: u64) -> Fireworks {
        Fireworks::with_rng(
            800.0,
            600.0,
            BurstParams::default(),
            ParticleParams::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn spawn_adds_a_full_burst_at_origin() {
        let mut fw = fireworks(1);
        fw.spawn(100.0, 100.0);
        assert_eq!(fw.len(), 50);
        assert!(
            fw.particles()
                .iter()
                .all(|p| p.position == Point2::new(100.0, 100.0) && p.opacity == 1.0)
        );
    }

    #[test]
    fn out_of_bounds_spawn_is_allowed() {
        let mut fw = fireworks(2);
        fw.spawn(-50.0, 10_000.0);
        assert_eq!(fw.len(), 50);
    }

    fn hues(particles: &[Particle]) -> Vec<f32> {
        particles
            .iter()
            .filter_map(|p| match p.color {
                FireworkColor::Hue(h) => Some(h),
                FireworkColor::Named(_) => None,
            })
            .collect()
    }

    #[test]
    fn burst_shares_one_hue() {
        let mut fw = fireworks(3);
        fw.spawn(0.0, 0.0);
        assert!(hues(fw.particles()).windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn each_burst_rolls_its_own_hue() {
        let mut fw = fireworks(12);
        fw.spawn(0.0, 0.0);
        fw.spawn(200.0, 200.0);
        let (first, second) = fw.particles().split_at(50);
        let first = hues(first);
        let second = hues(second);
        assert!(!first.is_empty() && !second.is_empty());
        assert_ne!(first[0], second[0]);
    }

    #[test]
    fn tick_clears_then_draws_each_particle() {
        let mut fw = fireworks(4);
        fw.spawn(10.0, 10.0);
        let mut surface = DisplayList::new();
        fw.tick(&mut surface);

        let commands = surface.commands();
        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                width: 800.0,
                height: 600.0
            }
        );
        assert_eq!(surface.circles().count(), 50);
        assert_eq!(surface.state().depth(), 0);
        for ((center, radius, state), p) in surface.circles().zip(fw.particles()) {
            assert_eq!(center, p.position);
            assert_eq!(radius, p.radius);
            assert_eq!(state.alpha, p.opacity as f32);
        }
    }

    #[test]
    fn tick_culls_faded_particles() {
        let mut fw = fireworks(5);
        fw.spawn(0.0, 0.0);
        let mut surface = DisplayList::new();
        for _ in 0..60 {
            fw.tick(&mut surface);
            assert!(fw.particles().iter().all(|p| p.opacity > 0.0));
        }
    }

    #[test]
    fn resize_leaves_particles_alone() {
        let mut fw = fireworks(6);
        fw.spawn(30.0, 40.0);
        fw.tick(&mut DisplayList::new());
        let before = fw.particles().to_vec();
        fw.resize(1920.0, 1080.0);
        assert_eq!((fw.width, fw.height), (1920.0, 1080.0));
        assert_eq!(fw.particles(), &before[..]);
    }

    #[test]
    fn ambient_spawn_lands_in_upper_half() {
        let mut fw = fireworks(7);
        for _ in 0..200 {
            fw.spawn_ambient();
        }
        for p in fw.particles() {
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((0.0..300.0).contains(&p.position.y));
        }
    }

    #[test]
    fn ambient_spawn_on_empty_surface() {
        let mut fw = fireworks(8);
        fw.resize(0.0, 0.0);
        fw.spawn_ambient();
        assert!(fw.particles().iter().all(|p| p.position == Point2::new(0.0, 0.0)));
    }
}
