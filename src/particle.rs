use cgmath::{Point2, Vector2};
use rand::Rng;

use crate::color::FireworkColor;
use crate::config::ParticleParams;
use crate::surface::Surface;

/// One spark of a burst. Moves in a straight line and fades out by a fixed
/// amount every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Point2<f32>,
    pub velocity: Vector2<f32>,
    pub color: FireworkColor,
    pub radius: f32,
    pub opacity: f64,
    pub decay: f64,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(
        origin: Point2<f32>,
        color: FireworkColor,
        params: &ParticleParams,
        rng: &mut R,
    ) -> Self {
        let speed = params.max_speed;
        Self {
            position: origin,
            velocity: Vector2::new(rng.gen_range(-speed..speed), rng.gen_range(-speed..speed)),
            color,
            radius: rng.gen_range(params.min_radius..params.max_radius),
            opacity: 1.0,
            decay: rng.gen_range(params.min_decay..params.max_decay),
        }
    }

    pub fn update(&mut self) {
        self.position += self.velocity;
        self.opacity -= self.decay;
    }

    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.is_alive() {
            return;
        }
        surface.save();
        surface.set_global_alpha(self.opacity.min(1.0) as f32);
        surface.set_fill_color(self.color.rgb());
        surface.fill_circle(self.position, self.radius);
        surface.restore();
    }
}
