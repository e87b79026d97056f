/// Interaction overlay for the board
/// Draws guides, the selection outline and handles, and turns pointer
/// events into selection, manipulation and container-size messages
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Path, Program, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Theme};

use crate::geometry::ContainerBounds;
use crate::moveable::{handle_rects, Handle, Manipulator, Moveable, MoveableOptions, Target};
use crate::state::tile::Tile;
use crate::Message;

const GUIDE_COLOR: Color = Color { r: 0.2, g: 0.6, b: 1.0, a: 0.25 };
const SELECTION_COLOR: Color = Color { r: 0.27, g: 0.55, b: 1.0, a: 1.0 };

/// Canvas program layered above the tile images
pub struct Surface<'a> {
    pub tiles: &'a [Tile],
    pub selected: Option<Target>,
    pub options: &'a MoveableOptions,
    pub container: Option<ContainerBounds>,
}

impl Surface<'_> {
    /// Topmost tile under the point
    fn tile_at(&self, at: Point) -> Option<&Tile> {
        self.tiles.iter().rev().find(|tile| tile.geometry.contains(at))
    }

    fn sync(&self, moveable: &mut Moveable) {
        if moveable.options() != self.options {
            moveable.set_options(self.options.clone());
        }
        if moveable.target() != self.selected {
            moveable.set_target(self.selected);
        }
    }
}

/// Pointer position relative to the board, even outside it
fn board_position(cursor: Cursor, bounds: Rectangle) -> Option<Point> {
    cursor
        .position()
        .map(|p| Point::new(p.x - bounds.x, p.y - bounds.y))
}

impl Program<Message> for Surface<'_> {
    type State = Moveable;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        self.sync(state);

        let handled = match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                match cursor.position_in(bounds) {
                    Some(at) if state.press(at) => Some((canvas::event::Status::Captured, None)),
                    Some(at) => self.tile_at(at).map(|tile| {
                        (canvas::event::Status::Captured, Some(Message::Select(tile.id)))
                    }),
                    None => None,
                }
            }

            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) if state.is_active() => {
                board_position(cursor, bounds)
                    .and_then(|at| state.drag_to(at))
                    .map(|proposal| (canvas::event::Status::Captured, Some(Message::Manipulate(proposal))))
            }

            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if state.is_active() => {
                board_position(cursor, bounds)
                    .and_then(|at| state.release(at))
                    .map(|proposal| (canvas::event::Status::Captured, Some(Message::Manipulate(proposal))))
            }

            _ => None,
        };

        if let Some((status, Some(message))) = handled {
            return (status, Some(message));
        }

        // Report the live container size on the first quiet event after a change
        let live = ContainerBounds::from(bounds.size());
        if self.container != Some(live) {
            let status = handled.map_or(canvas::event::Status::Ignored, |(status, _)| status);
            return (status, Some(Message::ContainerResized(live)));
        }

        handled.unwrap_or((canvas::event::Status::Ignored, None))
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let guide = Stroke::default().with_color(GUIDE_COLOR).with_width(1.0);

        for x in &self.options.guides.vertical {
            let line = Path::line(Point::new(*x, 0.0), Point::new(*x, bounds.height));
            frame.stroke(&line, guide.clone());
        }
        for y in &self.options.guides.horizontal {
            let line = Path::line(Point::new(0.0, *y), Point::new(bounds.width, *y));
            frame.stroke(&line, guide.clone());
        }

        if let Some(target) = self.selected {
            let g = target.geometry;
            let outline = Path::rectangle(Point::new(g.left, g.top), g.size());
            frame.stroke(&outline, Stroke::default().with_color(SELECTION_COLOR).with_width(2.0));

            for (_, rect) in handle_rects(&g) {
                frame.fill_rectangle(rect.position(), rect.size(), Color::WHITE);
                let border = Path::rectangle(rect.position(), rect.size());
                frame.stroke(&border, Stroke::default().with_color(SELECTION_COLOR).with_width(1.0));
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.is_active() {
            return mouse::Interaction::Grabbing;
        }
        let Some(at) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };

        if let Some(target) = self.selected {
            let over_handle = handle_rects(&target.geometry)
                .into_iter()
                .find(|(_, rect)| rect.contains(at));
            match over_handle {
                Some((Handle::East | Handle::West, _)) => return mouse::Interaction::ResizingHorizontally,
                Some((Handle::North | Handle::South, _)) => return mouse::Interaction::ResizingVertically,
                Some(_) => return mouse::Interaction::Crosshair,
                None if target.geometry.contains(at) => return mouse::Interaction::Grab,
                None => {}
            }
        }

        if self.tile_at(at).is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}
