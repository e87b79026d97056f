use std::collections::HashMap;

use clap::Parser;
use iced::widget::{button, canvas, column, container, image, row, stack, text};
use iced::{Alignment, Border, Color, Element, Length, Task, Theme};
use log::{debug, error, info, warn};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

mod config;
mod error;
mod geometry;
mod moveable;
mod photos;
mod state;
mod ui;

use config::Config;
use error::{FetchError, StoreError};
use geometry::ContainerBounds;
use moveable::{MoveableOptions, Proposal, Target};
use photos::{Photo, PhotoClient};
use state::board::Board;
use state::store::{Change, TileStore};
use state::tile::{FitMode, TileId};

/// Main application state
struct MoveableBoard {
    /// Tiles and the live container bounds
    board: Board,
    /// None when the HTTP client could not be built
    photos: Option<PhotoClient>,
    /// Decoded images by tile; tiles without an entry render a placeholder
    images: HashMap<TileId, image::Handle>,
    moveable: MoveableOptions,
    /// Photo fetches still in flight
    pending: usize,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Add Moveable"
    AddTile,
    /// A photo fetch finished
    PhotoLoaded(Result<Photo, FetchError>),
    /// User clicked "Remove Moveable"
    RemoveTile,
    /// User clicked a tile
    Select(TileId),
    /// The manipulation widget proposed a new geometry
    Manipulate(Proposal),
    /// The board was laid out with a new size
    ContainerResized(ContainerBounds),
}

impl MoveableBoard {
    fn new(config: Config) -> (Self, Task<Message>) {
        let (photos, status) = match PhotoClient::new(&config.endpoint, config.photo_id_range, config.request_timeout()) {
            Ok(client) => (Some(client), "Ready. Add a moveable to begin.".to_string()),
            Err(e) => {
                error!("Photo client unavailable: {}", e);
                (None, format!("Photos unavailable: {}", e))
            }
        };

        info!("Moveable board ready, photos from {}", config.endpoint);

        (
            MoveableBoard {
                board: Board::new(TileStore::new(config.tile_size)),
                photos,
                images: HashMap::new(),
                moveable: config.moveable_options(),
                pending: 0,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AddTile => {
                let Some(client) = &self.photos else {
                    self.status = "Cannot add a moveable: no photo client.".to_string();
                    return Task::none();
                };

                self.pending += 1;
                self.status = format!("Fetching {} photo(s)...", self.pending);

                // Launch async fetch; tiles land in resolution order
                Task::perform(client.clone().load(), Message::PhotoLoaded)
            }
            Message::PhotoLoaded(result) => {
                self.pending = self.pending.saturating_sub(1);

                match result {
                    Ok(photo) => {
                        let change = self.board.add(photo.url, FitMode::random());
                        if let (Change::Added(id), Some(pixels)) = (change, photo.pixels) {
                            let handle = image::Handle::from_rgba(pixels.width, pixels.height, pixels.rgba);
                            self.images.insert(id, handle);
                        }
                        self.status = self.count_status();
                    }
                    Err(e) => {
                        warn!("Moveable not added: {}", e);
                        self.status = format!("Could not add a moveable: {}", e);
                    }
                }

                Task::none()
            }
            Message::RemoveTile => {
                match self.board.remove_selected() {
                    Ok(Change::Removed(id)) => {
                        self.images.remove(&id);
                        self.status = self.count_status();
                    }
                    Ok(_) => {}
                    Err(StoreError::NothingSelected) => {
                        warn!("Remove requested with nothing selected");
                        MessageDialog::new()
                            .set_level(MessageLevel::Warning)
                            .set_title("Remove Moveable")
                            .set_description("Select a moveable to remove")
                            .set_buttons(MessageButtons::Ok)
                            .show();
                    }
                    Err(e) => {
                        warn!("Remove failed: {}", e);
                        self.status = format!("Nothing removed: {}", e);
                    }
                }

                Task::none()
            }
            Message::Select(id) if self.board.store().selected() == Some(id) => Task::none(),
            Message::Select(id) => {
                if let Err(e) = self.board.select(id) {
                    warn!("Select failed: {}", e);
                }
                Task::none()
            }
            Message::Manipulate(proposal) => {
                match self.board.apply(proposal) {
                    Ok(Change::Updated { id, committed: true }) => {
                        debug!("Tile {} committed at store revision {}", id, self.board.store().revision());
                        if let Some(tile) = self.board.store().get(id) {
                            let g = tile.geometry;
                            self.status = format!(
                                "Moveable at ({:.0}, {:.0}), {:.0}x{:.0}, fit {}",
                                g.left, g.top, g.width, g.height, tile.fit
                            );
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Dropped proposal for tile {}: {}", proposal.id(), e),
                }
                Task::none()
            }
            Message::ContainerResized(bounds) => {
                let corrected = self.board.set_container(bounds);
                if corrected > 0 {
                    info!("Pulled {} moveable(s) back inside the board", corrected);
                }
                Task::none()
            }
        }
    }

    fn count_status(&self) -> String {
        let store = self.board.store();
        if store.is_empty() {
            "The board is empty.".to_string()
        } else {
            format!("{} moveable(s) on the board.", store.len())
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let store = self.board.store();

        let controls = row![
            button(text("Add Moveable").size(20))
                .on_press(Message::AddTile)
                .padding(10)
                .style(button::success),
            button(text("Remove Moveable").size(20))
                .on_press(Message::RemoveTile)
                .padding(10)
                .style(button::danger),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let surface = ui::surface::Surface {
            tiles: store.tiles(),
            selected: store.selected_tile().map(|tile| Target {
                id: tile.id,
                geometry: tile.geometry,
            }),
            options: &self.moveable,
            container: self.board.container(),
        };

        let board = container(stack![
            ui::tiles::layer(store.tiles(), &self.images),
            canvas(surface).width(Length::Fill).height(Length::Fill),
        ])
        .padding(10)
        .width(Length::FillPortion(8))
        .height(Length::Fill)
        .clip(true)
        .style(|_theme: &Theme| container::Style {
            border: Border {
                color: Color::from_rgb8(0x77, 0x77, 0x77),
                width: 10.0,
                radius: 0.0.into(),
            },
            ..container::Style::default()
        });

        let content = column![
            controls,
            row![
                iced::widget::horizontal_space().width(Length::FillPortion(1)),
                board,
                iced::widget::horizontal_space().width(Length::FillPortion(1)),
            ]
            .height(Length::FillPortion(8)),
            text(&self.status).size(16),
        ]
        .spacing(20)
        .padding(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::init();
    let config = Config::parse();

    iced::application("Moveable Board", MoveableBoard::update, MoveableBoard::view)
        .theme(MoveableBoard::theme)
        .centered()
        .run_with(move || MoveableBoard::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> MoveableBoard {
        let (app, _) = MoveableBoard::new(Config::default());
        app
    }

    #[test]
    fn test_failed_fetch_adds_no_tile() {
        let mut app = app();
        let before = app.status.clone();
        let _ = app.update(Message::PhotoLoaded(Err(FetchError::Status {
            url: "https://photos.test/photos/7".to_string(),
            status: 500,
        })));

        assert_eq!(app.board.store().len(), 0);
        assert_ne!(app.status, before);
        assert!(app.status.contains("500"), "{}", app.status);
    }

    #[test]
    fn test_photo_without_pixels_adds_placeholder_tile() {
        let mut app = app();
        let _ = app.update(Message::PhotoLoaded(Ok(Photo {
            url: "https://img.test/600/92c952".to_string(),
            pixels: None,
        })));

        let store = app.board.store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.tiles()[0].image, "https://img.test/600/92c952");
        assert!(app.images.is_empty());
        assert_eq!(app.status, "1 moveable(s) on the board.");
    }

    #[test]
    fn test_remove_drops_the_tile_image() {
        let mut app = app();
        let _ = app.update(Message::PhotoLoaded(Ok(Photo {
            url: "https://img.test/1".to_string(),
            pixels: None,
        })));
        let id = app.board.store().tiles()[0].id;
        app.images.insert(id, image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255]));

        let _ = app.update(Message::Select(id));
        let _ = app.update(Message::RemoveTile);

        assert!(app.board.store().is_empty());
        assert!(app.images.is_empty());
        assert_eq!(app.status, "The board is empty.");
    }
}
