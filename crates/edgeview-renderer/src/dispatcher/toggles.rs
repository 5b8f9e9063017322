//! Display toggles. Each mutates one field of the render state and re-applies.

use edgeview_core::Color;
use tracing::info;

use super::{DispatchOutcome, Dispatcher, Event};

impl Dispatcher {
    /// Switch between fully opaque and translucent; reports whether the model is now opaque
    pub(super) fn handle_toggle_opacity(&mut self) -> DispatchOutcome {
        let opaque = !self.session.state.is_opaque();
        self.session.state.opacity = if opaque {
            1.0
        } else {
            self.config.display.translucent_opacity()
        };
        info!("Opacity set to {}", self.session.state.opacity);
        self.dispatch(Event::PostProcessModels);
        DispatchOutcome::Flag(opaque)
    }

    pub(super) fn handle_toggle_light(&mut self) -> DispatchOutcome {
        self.session.state.lit = !self.session.state.lit;
        let lit = self.session.state.lit;
        info!("Lighting {}", if lit { "on" } else { "off" });
        self.dispatch(Event::PostProcessModels);
        DispatchOutcome::Flag(lit)
    }

    pub(super) fn handle_toggle_thick_lines(&mut self) -> DispatchOutcome {
        self.session.state.use_thick_lines = !self.session.state.use_thick_lines;
        let thick = self.session.state.use_thick_lines;
        info!("Thick lines {}", if thick { "on" } else { "off" });
        self.dispatch(Event::PostProcessModels);
        DispatchOutcome::Flag(thick)
    }

    pub(super) fn handle_line_thickness(&mut self, thickness: f32) -> DispatchOutcome {
        self.session.state.thickness = thickness;
        info!("Line thickness set to {}", thickness);
        self.dispatch(Event::PostProcessModels);
        DispatchOutcome::Scalar(thickness)
    }

    pub(super) fn handle_line_colors(&mut self, color: Color) -> DispatchOutcome {
        self.session.state.line_color = color;
        info!("Line color set to {}", color);
        self.dispatch(Event::PostProcessModels);
        DispatchOutcome::Color(color)
    }
}
