//! Flip-book page structure.
//!
//! A book is always: rigid cover, flexible photo pages, an optional blank
//! flexible page, rigid back cover. The widget folds leaves in pairs, so the
//! number of flexible pages between the covers is kept even.

use super::decor::{RandomSource, Sticker, TapeStyle, random_stickers};
use crate::model::PhotoRecord;

/// Cover heading.
pub const COVER_TITLE: &str = "Our Memories";
/// Cover sub-heading.
pub const COVER_SUBTITLE: &str = "Photo Album";
/// Back cover heading.
pub const BACK_COVER_TITLE: &str = "The End 💚";

/// Page stiffness as understood by the flip-book widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// Rigid page that does not fold (covers)
    Hard,
    /// Flexible page with a curl animation
    Soft,
}

impl Density {
    /// Value of the widget's `data-density` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Hard => "hard",
            Density::Soft => "soft",
        }
    }
}

/// A photo in its polaroid frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Polaroid {
    pub url: String,
    pub public_id: String,
    pub tape: TapeStyle,
    pub stickers: Vec<Sticker>,
}

/// What a page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    Cover {
        title: &'static str,
        subtitle: &'static str,
        /// Number of photos in the album
        memories: usize,
    },
    Photos(Vec<Polaroid>),
    Blank,
    BackCover {
        title: &'static str,
    },
}

/// One leaf side handed to the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub density: Density,
    pub content: PageContent,
}

impl Page {
    fn cover(memories: usize) -> Self {
        Self {
            density: Density::Hard,
            content: PageContent::Cover {
                title: COVER_TITLE,
                subtitle: COVER_SUBTITLE,
                memories,
            },
        }
    }

    fn photos(polaroids: Vec<Polaroid>) -> Self {
        Self {
            density: Density::Soft,
            content: PageContent::Photos(polaroids),
        }
    }

    fn blank() -> Self {
        Self {
            density: Density::Soft,
            content: PageContent::Blank,
        }
    }

    fn back_cover() -> Self {
        Self {
            density: Density::Hard,
            content: PageContent::BackCover {
                title: BACK_COVER_TITLE,
            },
        }
    }

    /// Whether this page can fold.
    pub fn is_foldable(&self) -> bool {
        self.density == Density::Soft
    }
}

/// The full ordered page list for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct BookLayout {
    pub pages: Vec<Page>,
    pub photos_per_page: usize,
}

impl BookLayout {
    /// Total number of pages including covers.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages that carry photos.
    pub fn photo_page_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| matches!(p.content, PageContent::Photos(_)))
            .count()
    }

    /// Flexible pages between the covers.
    pub fn foldable_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_foldable()).count()
    }

    /// Whether a blank page was added to even out the flexible pages.
    pub fn has_padding(&self) -> bool {
        self.pages
            .iter()
            .any(|p| matches!(p.content, PageContent::Blank))
    }
}

/// Frame a photo for a slot on a page.
pub fn decorate_photo(
    photo: &PhotoRecord,
    page_index: usize,
    photo_index: usize,
    rng: &mut dyn RandomSource,
) -> Polaroid {
    Polaroid {
        url: photo.url.clone(),
        public_id: photo.public_id.clone(),
        tape: TapeStyle::for_slot(page_index, photo_index),
        stickers: random_stickers(rng),
    }
}

/// Build the page list for `photos` at the given viewport width.
pub fn build_pages(
    photos: &[PhotoRecord],
    viewport_width: f32,
    rng: &mut dyn RandomSource,
) -> BookLayout {
    let photos_per_page = super::Viewport::new(viewport_width, 0.0).photos_per_page();

    let mut pages = Vec::with_capacity(photos.len() / photos_per_page + 4);
    pages.push(Page::cover(photos.len()));

    let mut photo_pages = 0;
    for (page_index, chunk) in photos.chunks(photos_per_page).enumerate() {
        let polaroids = chunk
            .iter()
            .enumerate()
            .map(|(photo_index, photo)| decorate_photo(photo, page_index, photo_index, rng))
            .collect();
        pages.push(Page::photos(polaroids));
        photo_pages += 1;
    }

    if photo_pages % 2 != 0 {
        pages.push(Page::blank());
    }

    pages.push(Page::back_cover());

    log::debug!(
        "Built {} pages ({} photo pages, {} per page)",
        pages.len(),
        photo_pages,
        photos_per_page
    );

    BookLayout {
        pages,
        photos_per_page,
    }
}
