// Gesture routing: maps window-space pointer events onto the canvas controller.

use super::CanvasController;
use crate::config::palette::Color;
use crate::geometry::{Point, Rect};

/// What a routed pointer event did to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The pointer is over the canvas; the drag was armed or previewed.
    Inside,
    /// The pointer is off the canvas; any preview was discarded.
    Outside,
    /// The pointer was released over the canvas and a drop was attempted.
    Dropped,
}

/// Tracks where the canvas sits in window coordinates and forwards pointer
/// events in canvas-local coordinates.
#[derive(Debug, Clone)]
pub struct GestureRouter {
    frame: Rect,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self { frame: Rect::ZERO }
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Report where the canvas is laid out. Resizes the controller's canvas.
    pub fn set_frame(&mut self, controller: &mut CanvasController, frame: Rect) {
        self.frame = frame;
        controller.set_canvas_size(frame.size());
    }

    fn to_local(&self, global: Point) -> Option<Point> {
        if self.frame.contains_point(global) {
            Some(Point::new(global.x - self.frame.x, global.y - self.frame.y))
        } else {
            None
        }
    }

    /// The pointer moved while a palette swatch of `color` is held.
    pub fn drag_moved(
        &mut self,
        controller: &mut CanvasController,
        color: Color,
        global: Point,
    ) -> RouteOutcome {
        match self.to_local(global) {
            Some(local) => {
                controller.drag_inside(color, local);
                RouteOutcome::Inside
            }
            None => {
                controller.drag_outside();
                RouteOutcome::Outside
            }
        }
    }

    /// The swatch was released at `global`. Drops only land on the canvas;
    /// a release off the canvas cancels the drag like a move outside does.
    pub fn drag_released(
        &mut self,
        controller: &mut CanvasController,
        global: Point,
    ) -> RouteOutcome {
        match self.to_local(global) {
            Some(local) => {
                controller.end_dragging(local);
                RouteOutcome::Dropped
            }
            None => {
                controller.drag_outside();
                RouteOutcome::Outside
            }
        }
    }
}

impl Default for GestureRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DragState;

    fn red() -> Color {
        Color::new(1.0, 0.0, 0.0, 1.0)
    }

    fn blue() -> Color {
        Color::new(0.0, 0.0, 1.0, 1.0)
    }

    /// A 400x400 canvas placed at (100, 50) in the window.
    fn setup() -> (GestureRouter, CanvasController) {
        let mut controller = CanvasController::default();
        let mut router = GestureRouter::new();
        router.set_frame(&mut controller, Rect::new(100.0, 50.0, 400.0, 400.0));
        (router, controller)
    }

    #[test]
    fn set_frame_sizes_the_canvas() {
        let (_router, controller) = setup();
        assert_eq!(controller.canvas_rect(), Rect::new(0.0, 0.0, 400.0, 400.0));
    }

    #[test]
    fn move_inside_frame_arms_drag() {
        let (mut router, mut controller) = setup();
        let outcome = router.drag_moved(&mut controller, red(), Point::new(150.0, 60.0));
        assert_eq!(outcome, RouteOutcome::Inside);
        assert!(matches!(controller.drag_state(), DragState::FromPalette { .. }));
    }

    #[test]
    fn move_outside_frame_cancels_drag() {
        let (mut router, mut controller) = setup();
        router.drag_moved(&mut controller, red(), Point::new(150.0, 60.0));
        let outcome = router.drag_moved(&mut controller, red(), Point::new(10.0, 10.0));
        assert_eq!(outcome, RouteOutcome::Outside);
        assert_eq!(*controller.drag_state(), DragState::Idle);
    }

    #[test]
    fn release_inside_drops_in_local_coordinates() {
        let (mut router, mut controller) = setup();
        router.drag_moved(&mut controller, red(), Point::new(300.0, 250.0));
        router.drag_moved(&mut controller, red(), Point::new(300.0, 250.0));
        let outcome = router.drag_released(&mut controller, Point::new(300.0, 250.0));
        assert_eq!(outcome, RouteOutcome::Dropped);
        let tiles = controller.current_tiles();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].rect, Rect::new(0.0, 0.0, 400.0, 400.0));
    }

    #[test]
    fn second_drop_uses_local_coordinates_for_zones() {
        let (mut router, mut controller) = setup();
        let center = Point::new(300.0, 250.0);
        router.drag_moved(&mut controller, red(), center);
        router.drag_released(&mut controller, center);
        // Local (380, 200): the right zone of the full-canvas tile.
        let right = Point::new(480.0, 250.0);
        router.drag_moved(&mut controller, red(), right);
        router.drag_released(&mut controller, right);
        let tiles = controller.current_tiles();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1].rect, Rect::new(200.0, 0.0, 200.0, 400.0));
    }

    #[test]
    fn release_outside_frame_cancels_preview() {
        let (mut router, mut controller) = setup();
        let center = Point::new(300.0, 250.0);
        router.drag_moved(&mut controller, red(), center);
        router.drag_released(&mut controller, center);

        // Preview in the right zone, then let go past the frame's right edge.
        let right = Point::new(480.0, 250.0);
        router.drag_moved(&mut controller, blue(), right);
        router.drag_moved(&mut controller, blue(), right);
        assert!(controller.current_preview_tile().is_some());
        let outcome = router.drag_released(&mut controller, Point::new(600.0, 250.0));

        assert_eq!(outcome, RouteOutcome::Outside);
        assert_eq!(*controller.drag_state(), DragState::Idle);
        assert!(controller.current_preview_tile().is_none());
        let tiles = controller.current_tiles();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].rect, Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(tiles[0].color, red());
    }

    #[test]
    fn drag_after_release_outside_carries_the_new_color() {
        let (mut router, mut controller) = setup();
        let center = Point::new(300.0, 250.0);
        router.drag_moved(&mut controller, red(), center);
        router.drag_released(&mut controller, center);
        let right = Point::new(480.0, 250.0);
        router.drag_moved(&mut controller, red(), right);
        router.drag_moved(&mut controller, red(), right);
        router.drag_released(&mut controller, Point::new(600.0, 250.0));

        router.drag_moved(&mut controller, blue(), right);
        router.drag_moved(&mut controller, blue(), right);
        let preview = controller.current_preview_tile().unwrap();
        assert_eq!(preview.color, blue());
    }

    #[test]
    fn release_outside_without_drag_leaves_canvas_empty() {
        let (mut router, mut controller) = setup();
        let outcome = router.drag_released(&mut controller, Point::new(600.0, 600.0));
        assert_eq!(outcome, RouteOutcome::Outside);
        assert!(controller.is_empty());
        assert_eq!(*controller.drag_state(), DragState::Idle);
    }
}
