use cgmath::Point2;

use crate::color::Rgb;

/// 2D raster target the show draws onto. Mirrors the immediate-mode calls a
/// canvas context offers: state is pushed with `save` and popped with
/// `restore`, alpha and fill color apply to every following `fill_circle`.
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill_color(&mut self, color: Rgb);
    fn fill_circle(&mut self, center: Point2<f32>, radius: f32);
}

/// Alpha and fill color, the part of the surface state that `save` and
/// `restore` cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub alpha: f32,
    pub fill: Rgb,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fill: Rgb::new(0, 0, 0),
        }
    }
}

/// Save/restore stack shared by surface implementations.
#[derive(Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn current(&self) -> DrawState {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    // Unbalanced restores are ignored, like a canvas context does.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    // Values outside [0, 1] are ignored.
    pub fn set_alpha(&mut self, alpha: f32) {
        if (0.0..=1.0).contains(&alpha) {
            self.current.alpha = alpha;
        }
    }

    pub fn set_fill(&mut self, fill: Rgb) {
        self.current.fill = fill;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Circle {
        center: Point2<f32>,
        radius: f32,
        state: DrawState,
    },
}

/// Surface that records a display list instead of rasterizing.
#[derive(Debug, Default)]
pub struct DisplayList {
    state: StateStack,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point2<f32>, f32, DrawState)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle {
                center,
                radius,
                state,
            } => Some((*center, *radius, *state)),
            DrawCommand::Clear { .. } => None,
        })
    }

    pub fn state(&self) -> &StateStack {
        &self.state
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.set_alpha(alpha);
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.state.set_fill(color);
    }

    fn fill_circle(&mut self, center: Point2<f32>, radius: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            state: self.state.current(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_returns_to_saved_state() {
        let mut surface = DisplayList::new();
        surface.save();
        surface.set_global_alpha(0.25);
        surface.set_fill_color(Rgb::new(1, 2, 3));
        surface.restore();
        assert_eq!(surface.state().current(), DrawState::default());
        assert_eq!(surface.state().depth(), 0);
    }

    #[test]
    fn out_of_range_alpha_is_ignored() {
        let mut stack = StateStack::default();
        stack.set_alpha(0.5);
        stack.set_alpha(-0.1);
        stack.set_alpha(1.5);
        assert_eq!(stack.current().alpha, 0.5);
    }

    #[test]
    fn unbalanced_restore_is_harmless() {
        let mut stack = StateStack::default();
        stack.restore();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current(), DrawState::default());
    }
}
