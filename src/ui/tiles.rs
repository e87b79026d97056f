use std::collections::HashMap;

use iced::widget::{container, image, text, Stack};
use iced::{Element, Length, Padding};

use crate::state::tile::{Tile, TileId};
use crate::Message;

/// Every tile at its position, in store order (later tiles on top)
pub fn layer<'a>(tiles: &'a [Tile], images: &'a HashMap<TileId, image::Handle>) -> Element<'a, Message> {
    let layers: Vec<Element<'a, Message>> = tiles
        .iter()
        .map(|tile| positioned(tile, images.get(&tile.id)))
        .collect();

    Stack::with_children(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn positioned<'a>(tile: &'a Tile, handle: Option<&image::Handle>) -> Element<'a, Message> {
    let g = tile.geometry;
    let width = Length::Fixed(g.width);
    let height = Length::Fixed(g.height);

    let content: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .width(width)
            .height(height)
            .content_fit(tile.fit.into())
            .into(),
        // the reference resolved but the bytes did not arrive
        None => container(text(&tile.image).size(10))
            .width(width)
            .height(height)
            .padding(4)
            .clip(true)
            .style(container::rounded_box)
            .into(),
    };

    container(content)
        .padding(Padding {
            top: g.top,
            left: g.left,
            right: 0.0,
            bottom: 0.0,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
