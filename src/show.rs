//! The mounted fireworks component.
//!
//! A [`Show`] owns the simulation together with every resource the host
//! lends it: the ambient burst timer, the click/resize/interaction
//! listeners, and the soundtrack. Teardown releases all of them at once and
//! is safe to repeat; dropping a show tears it down too.

use std::time::{Duration, Instant};

use cgmath::Point2;

use crate::audio::AudioUnlock;
use crate::config::ShowParams;
use crate::simulation::Fireworks;
use crate::surface::Surface;
use crate::timer::Interval;

/// Input delivered by the host, in delivery order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer click in screen coordinates. `surface_origin` is the screen
    /// position of the surface's top-left corner.
    Click {
        position: Point2<f32>,
        surface_origin: Point2<f32>,
    },
    Resize {
        width: f32,
        height: f32,
    },
    /// Any user interaction; only used to unlock audio.
    Interaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    Click,
    Resize,
    Interaction,
}

#[derive(Debug, Default, Clone, Copy)]
struct Listeners {
    click: bool,
    resize: bool,
    interaction: bool,
}

impl Listeners {
    fn all() -> Self {
        Self {
            click: true,
            resize: true,
            interaction: true,
        }
    }

    fn slot(&mut self, listener: Listener) -> &mut bool {
        match listener {
            Listener::Click => &mut self.click,
            Listener::Resize => &mut self.resize,
            Listener::Interaction => &mut self.interaction,
        }
    }

    fn is_attached(&self, listener: Listener) -> bool {
        match listener {
            Listener::Click => self.click,
            Listener::Resize => self.resize,
            Listener::Interaction => self.interaction,
        }
    }

    fn count(&self) -> usize {
        [self.click, self.resize, self.interaction]
            .into_iter()
            .filter(|attached| *attached)
            .count()
    }
}

pub struct Show {
    state: ShowState,
    fireworks: Fireworks,
    ambient: Interval,
    listeners: Listeners,
    audio: AudioUnlock,
}

impl Show {
    /// Wires listeners and starts the ambient timer.
    pub fn mount(
        params: &ShowParams,
        fireworks: Fireworks,
        audio: AudioUnlock,
        now: Instant,
    ) -> Self {
        let mut ambient = Interval::new(Duration::from_millis(params.burst.ambient_interval_ms));
        ambient.start(now);
        log::info!(
            "Show mounted on {}x{} surface, ambient burst every {:?}",
            fireworks.width,
            fireworks.height,
            ambient.period()
        );
        Self {
            state: ShowState::Running,
            fireworks,
            ambient,
            listeners: Listeners::all(),
            audio,
        }
    }

    pub fn state(&self) -> ShowState {
        self.state
    }

    pub fn fireworks(&self) -> &Fireworks {
        &self.fireworks
    }

    pub fn audio(&self) -> &AudioUnlock {
        &self.audio
    }

    pub fn is_attached(&self, listener: Listener) -> bool {
        self.listeners.is_attached(listener)
    }

    /// Timers plus listeners still held.
    pub fn active_resources(&self) -> usize {
        self.listeners.count() + usize::from(self.ambient.is_active())
    }

    /// Time until the ambient timer is next due, if it is running.
    pub fn next_ambient_in(&self, now: Instant) -> Option<Duration> {
        self.ambient.remaining(now)
    }

    pub fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::Click {
                position,
                surface_origin,
            } => {
                if self.listeners.is_attached(Listener::Click) {
                    let local = position - surface_origin;
                    self.fireworks.spawn(local.x, local.y);
                }
            }
            HostEvent::Resize { width, height } => {
                if self.listeners.is_attached(Listener::Resize) {
                    log::info!("Resizing: ({}, {})", width, height);
                    self.fireworks.resize(width, height);
                }
            }
            HostEvent::Interaction => {
                if self.listeners.is_attached(Listener::Interaction) && self.audio.on_interaction()
                {
                    *self.listeners.slot(Listener::Interaction) = false;
                }
            }
        }
    }

    /// Runs one animation frame: fires the ambient timer if due, then ticks
    /// the simulation. Returns whether the host should schedule another
    /// frame.
    pub fn frame(&mut self, now: Instant, surface: &mut dyn Surface) -> bool {
        if self.state == ShowState::Stopped {
            return false;
        }
        if self.ambient.poll(now) {
            self.fireworks.spawn_ambient();
        }
        self.fireworks.tick(surface);
        true
    }

    pub fn teardown(&mut self) {
        if self.state == ShowState::Stopped {
            return;
        }
        self.ambient.cancel();
        self.listeners = Listeners::default();
        self.audio.stop();
        self.state = ShowState::Stopped;
        log::info!(
            "Show stopped after {} ticks with {} live particles",
            self.fireworks.ticks(),
            self.fireworks.len()
        );
    }
}

impl Drop for Show {
    fn drop(&mut self) {
        self.teardown();
    }
}
