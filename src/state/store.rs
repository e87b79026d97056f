use log::{debug, info};
use rand::Rng;

use super::tile::{FitMode, Tile, TileId};
use crate::error::StoreError;
use crate::geometry::Geometry;

/// Side length of a freshly added tile
pub const DEFAULT_TILE_SIZE: f32 = 100.0;

/// What a store mutation changed, so the view knows what to redraw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    Added(TileId),
    Removed(TileId),
    Updated { id: TileId, committed: bool },
    Selected(TileId),
}

/// Ordered collection of tiles plus the single selection slot.
///
/// Owned by the application and mutated only from the UI thread. Every
/// mutation bumps `revision` and reports a [`Change`].
#[derive(Debug, Clone)]
pub struct TileStore {
    tiles: Vec<Tile>,
    selected: Option<TileId>,
    revision: u64,
    tile_size: f32,
}

impl Default for TileStore {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

impl TileStore {
    /// Create an empty store whose new tiles are `tile_size` square
    pub fn new(tile_size: f32) -> Self {
        Self {
            tiles: Vec::new(),
            selected: None,
            revision: 0,
            tile_size,
        }
    }

    /// Append a tile at the container origin with the default size.
    /// The identifier is random and never collides with a live tile.
    pub fn add(&mut self, image: String, fit: FitMode) -> Change {
        let id = self.fresh_id();
        self.tiles.push(Tile {
            id,
            geometry: Geometry::new(0.0, 0.0, self.tile_size, self.tile_size),
            image,
            fit,
            committed: true,
        });
        self.revision += 1;

        info!("Added tile {} ({} tiles)", id, self.tiles.len());
        Change::Added(id)
    }

    /// Make `id` the selected tile
    pub fn select(&mut self, id: TileId) -> Result<Change, StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::UnknownTile(id));
        }
        if self.selected != Some(id) {
            self.selected = Some(id);
            self.revision += 1;
            debug!("Selected tile {}", id);
        }
        Ok(Change::Selected(id))
    }

    /// Delete the selected tile and clear the selection.
    ///
    /// With nothing selected the store is left untouched. A selection that
    /// no longer matches a tile is cleared without deleting anything.
    pub fn remove_selected(&mut self) -> Result<Change, StoreError> {
        let id = self.selected.ok_or(StoreError::NothingSelected)?;
        self.selected = None;
        self.revision += 1;

        let index = self
            .tiles
            .iter()
            .position(|tile| tile.id == id)
            .ok_or(StoreError::UnknownTile(id))?;
        self.tiles.remove(index);

        info!("Removed tile {} ({} tiles left)", id, self.tiles.len());
        Ok(Change::Removed(id))
    }

    /// Replace the geometry of tile `id`, keeping its identity and image.
    ///
    /// `committed` marks the final update of a gesture.
    pub fn update(&mut self, id: TileId, geometry: Geometry, committed: bool) -> Result<Change, StoreError> {
        let tile = self
            .tiles
            .iter_mut()
            .find(|tile| tile.id == id)
            .ok_or(StoreError::UnknownTile(id))?;

        tile.geometry = geometry;
        tile.committed = committed;
        self.revision += 1;

        Ok(Change::Updated { id, committed })
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Tiles in insertion order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Incremented on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn fresh_id(&self) -> TileId {
        let mut rng = rand::rng();
        loop {
            let id = TileId(rng.random());
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}
