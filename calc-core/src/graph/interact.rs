use super::{point::CanvasPoint, viewport::Viewport};

/// Whether the pointer is currently dragging the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Drag {
    /// The pointer is not pressed.
    #[default]
    Idle,

    /// The pointer was pressed on the canvas and has not been released yet.
    Dragging {
        /// The last position of the pointer.
        last: CanvasPoint<f64>,
    },
}

/// Tracks the pointer over the canvas: dragging to pan, and hovering to inspect the function.
///
/// The hovered position is only tracked while not dragging.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Interaction {
    drag: Drag,
    hover: Option<CanvasPoint<f64>>,
}

impl Interaction {
    /// Returns the drag state.
    pub fn drag(&self) -> Drag {
        self.drag
    }

    /// Returns the position of the hovering pointer, if it is over the canvas and not dragging.
    pub fn hover(&self) -> Option<CanvasPoint<f64>> {
        self.hover
    }

    /// The pointer was pressed at `position`, starting a drag.
    pub fn pointer_down(&mut self, position: CanvasPoint<f64>) {
        self.drag = Drag::Dragging { last: position };
        self.hover = None;
    }

    /// The pointer moved to `position`. While dragging, the viewport is panned to follow it.
    /// Returns true if the viewport changed.
    pub fn pointer_move(&mut self, position: CanvasPoint<f64>, viewport: &mut Viewport) -> bool {
        match self.drag {
            Drag::Dragging { last } => {
                viewport.pan_by_pixels(position.delta_from(last));
                self.drag = Drag::Dragging { last: position };
                true
            },
            Drag::Idle => {
                self.hover = Some(position);
                false
            },
        }
    }

    /// The pointer was released at its last position, ending any drag.
    pub fn pointer_up(&mut self) {
        if let Drag::Dragging { last } = self.drag {
            self.hover = Some(last);
        }
        self.drag = Drag::Idle;
    }

    /// The pointer left the canvas, ending any drag and hover.
    pub fn pointer_leave(&mut self) {
        self.drag = Drag::Idle;
        self.hover = None;
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn drag_pans_the_viewport() {
        let mut viewport = Viewport::default().with_canvas_size(100, 100);
        let mut interaction = Interaction::default();

        interaction.pointer_down(CanvasPoint(50.0, 50.0));
        assert!(interaction.pointer_move(CanvasPoint(60.0, 50.0), &mut viewport));
        assert!(interaction.pointer_move(CanvasPoint(70.0, 40.0), &mut viewport));
        assert_eq!(interaction.hover(), None);

        assert_float_absolute_eq!(viewport.pan.0, -4.0);
        assert_float_absolute_eq!(viewport.pan.1, -2.0);

        interaction.pointer_up();
        assert_eq!(interaction.drag(), Drag::Idle);
        assert_eq!(interaction.hover(), Some(CanvasPoint(70.0, 40.0)));
    }

    #[test]
    fn hover_without_drag() {
        let mut viewport = Viewport::default();
        let mut interaction = Interaction::default();

        assert!(!interaction.pointer_move(CanvasPoint(10.0, 20.0), &mut viewport));
        assert_eq!(interaction.hover(), Some(CanvasPoint(10.0, 20.0)));
        assert_eq!(viewport, Viewport::default());

        interaction.pointer_leave();
        assert_eq!(interaction.hover(), None);
    }

    #[test]
    fn leaving_ends_a_drag() {
        let mut viewport = Viewport::default();
        let mut interaction = Interaction::default();

        interaction.pointer_down(CanvasPoint(0.0, 0.0));
        interaction.pointer_leave();
        assert_eq!(interaction.drag(), Drag::Idle);
        assert!(!interaction.pointer_move(CanvasPoint(5.0, 5.0), &mut viewport));
        assert_eq!(viewport.pan, Viewport::default().pan);
    }
}
