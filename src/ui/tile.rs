/// Per-tile canvas renderer with pan and wheel-zoom gestures
///
/// Each gallery entry gets one `TileCanvas`. The canvas draws the image
/// through the tile's transform, punches the shape mask over it, and turns
/// raw pointer input into gallery messages. Gesture state lives in the
/// canvas-local `DragState` and is never persisted to the gallery.

use cgmath::Vector2;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Program};
use iced::widget::image::Handle;
use iced::{Point, Rectangle, Renderer, Size, Theme, Vector};

use crate::state::data::Shape;
use crate::state::edit::{TileEdit, ZOOM_STEP};
use crate::ui::mask;
use crate::Message;

/// Natural side length of every tile, in logical pixels
pub const TILE_SIZE: f32 = 260.0;

/// One tile's drawing and interaction surface
pub struct TileCanvas {
    /// Gallery id of the entry this tile displays
    pub id: i64,
    /// Handle for the active filter variant (or the unfiltered image)
    pub handle: Handle,
    /// Current transform state, applied at draw time
    pub edit: TileEdit,
    /// Global silhouette selection
    pub shape: Shape,
}

/// State for the pan drag gesture
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub is_dragging: bool,
    pub last_position: Option<Point>,
}

impl Program<Message> for TileCanvas {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Mouse wheel over the tile adjusts zoom
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if cursor.position_in(bounds).is_some() {
                    let lines = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y,
                        mouse::ScrollDelta::Pixels { y, .. } => y / 20.0,
                    };
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::ZoomBy(self.id, lines * ZOOM_STEP)),
                    );
                }
            }

            // Press over the image starts panning. Capturing the press
            // keeps it away from the reorder handler: pan wins on a press
            // directly over the image.
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if cursor.position_in(bounds).is_some() {
                    state.is_dragging = true;
                    state.last_position = cursor.position();
                    return (canvas::event::Status::Captured, None);
                }
            }

            // Release ends the gesture wherever the cursor is, not just
            // over the tile
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.is_dragging {
                    state.is_dragging = false;
                    state.last_position = None;
                    return (canvas::event::Status::Captured, None);
                }
            }

            // Move while panning: accumulate the delta since the last
            // recorded position
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if state.is_dragging {
                    if let (Some(current), Some(last)) = (cursor.position(), state.last_position) {
                        let delta = Vector2::new(current.x - last.x, current.y - last.y);
                        state.last_position = Some(current);
                        return (
                            canvas::event::Status::Captured,
                            Some(Message::Pan(self.id, delta)),
                        );
                    }
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let size = bounds.width.min(bounds.height);
        let half = size / 2.0;

        // Image layer: translate(offset) rotate(rotation) scale(scale),
        // composed in that order about the tile center
        frame.with_save(|frame| {
            frame.translate(Vector::new(
                half + self.edit.offset.x,
                half + self.edit.offset.y,
            ));
            frame.rotate(self.edit.rotation.to_radians());
            frame.scale(self.edit.scale);
            frame.draw_image(
                Rectangle::new(Point::new(-half, -half), Size::new(size, size)),
                canvas::Image::new(self.handle.clone()),
            );
        });

        // Everything outside the silhouette is painted over with the
        // window background, leaving the shape as a window onto the image
        if let Some(cutout) = mask::cutout(self.shape, size) {
            frame.fill(
                &cutout,
                canvas::Fill {
                    style: canvas::Style::Solid(theme.palette().background),
                    rule: canvas::fill::Rule::EvenOdd,
                },
            );
        }

        vec![frame.into_geometry()]
    }
}
