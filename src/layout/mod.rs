//! Layout engine: page sizing and flip-book page structure.

mod decor;
mod dimensions;
mod pages;

pub use decor::{EMOJIS, RandomSource, Sticker, StickerPlacement, TapeStyle, random_stickers};
pub use dimensions::{Dimensions, Viewport, compute_dimensions};
pub use pages::{
    BACK_COVER_TITLE, BookLayout, COVER_SUBTITLE, COVER_TITLE, Density, Page, PageContent,
    Polaroid, build_pages, decorate_photo,
};
