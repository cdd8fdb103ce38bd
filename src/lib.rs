pub mod audio;
pub mod color;
pub mod config;
pub mod particle;
pub mod show;
pub mod simulation;
pub mod surface;
pub mod timer;

pub use color::{BurstPalette, FireworkColor, NamedColor, Rgb};
pub use config::{BurstParams, ParticleParams, ShowParams};
pub use particle::Particle;
pub use show::{HostEvent, Listener, Show, ShowState};
pub use simulation::Fireworks;
pub use surface::{DisplayList, Surface};
