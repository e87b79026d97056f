use iced::Size;
use log::{debug, warn};

use super::store::{Change, TileStore};
use super::tile::{FitMode, TileId};
use crate::error::StoreError;
use crate::geometry::{clamp_drag, clamp_resize, ContainerBounds, Geometry};
use crate::moveable::Proposal;

/// Smallest width/height a tile may have
const MIN_EXTENT: f32 = 1.0;

fn floored(size: Size) -> Size {
    Size::new(size.width.max(MIN_EXTENT), size.height.max(MIN_EXTENT))
}

/// The tile store together with the live container bounds.
///
/// Every geometry change goes through the boundary clamp before it reaches
/// the store. Until the container has been laid out the bounds are unknown
/// and proposals are stored as given.
#[derive(Debug, Clone, Default)]
pub struct Board {
    store: TileStore,
    container: Option<ContainerBounds>,
}

impl Board {
    pub fn new(store: TileStore) -> Self {
        Self {
            store,
            container: None,
        }
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn container(&self) -> Option<ContainerBounds> {
        self.container
    }

    /// Record the container's rendered size and pull every tile back inside.
    /// Returns how many tiles were moved or shrunk.
    ///
    /// A container narrower or shorter than one unit (collapsed or hidden)
    /// counts as not laid out: the bounds become unknown and no tile is
    /// touched.
    pub fn set_container(&mut self, bounds: ContainerBounds) -> usize {
        if bounds.width < MIN_EXTENT || bounds.height < MIN_EXTENT {
            if self.container.take().is_some() {
                debug!("Container collapsed to {}x{}, bounds unknown", bounds.width, bounds.height);
            }
            return 0;
        }
        if self.container == Some(bounds) {
            return 0;
        }
        debug!("Container resized to {}x{}", bounds.width, bounds.height);
        self.container = Some(bounds);

        let corrections: Vec<(_, Geometry)> = self
            .store
            .tiles()
            .iter()
            .filter_map(|tile| {
                let g = tile.geometry;
                let placed = clamp_drag(Some(bounds), g.drag_box(bounds));
                let fitted = placed.resized_to(floored(clamp_resize(Some(bounds), placed, placed.size())));
                (fitted != g).then_some((tile.id, fitted))
            })
            .collect();

        for (id, geometry) in &corrections {
            if let Err(e) = self.store.update(*id, *geometry, true) {
                warn!("Could not pull tile {} inside the board: {}", id, e);
            }
        }
        corrections.len()
    }

    pub fn add(&mut self, image: String, fit: FitMode) -> Change {
        self.store.add(image, fit)
    }

    pub fn select(&mut self, id: TileId) -> Result<Change, StoreError> {
        self.store.select(id)
    }

    pub fn remove_selected(&mut self) -> Result<Change, StoreError> {
        self.store.remove_selected()
    }

    /// Clamp a manipulation proposal and write it to the store
    pub fn apply(&mut self, proposal: Proposal) -> Result<Change, StoreError> {
        match proposal {
            Proposal::Drag { id, geometry, committed } => {
                let placed = match self.container {
                    Some(bounds) => clamp_drag(Some(bounds), geometry.drag_box(bounds)),
                    None => geometry,
                };
                self.store.update(id, placed, committed)
            }
            Proposal::Resize { id, size, committed } => {
                let current = self
                    .store
                    .get(id)
                    .ok_or(StoreError::UnknownTile(id))?
                    .geometry;
                let fitted = floored(clamp_resize(self.container, current, floored(size)));
                self.store.update(id, current.resized_to(fitted), committed)
            }
        }
    }
}
