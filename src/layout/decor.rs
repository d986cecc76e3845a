//! Scrapbook decoration: tape strips and stickers.
//!
//! Randomness goes through [`RandomSource`] so tests can script the draws and
//! check bounds instead of exact visual output.

use rand::Rng;

/// Source of uniform values in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let scaled = (self.next_unit() * len as f32) as usize;
        scaled.min(len.saturating_sub(1))
    }
}

impl RandomSource for rand::rngs::ThreadRng {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

impl RandomSource for rand::rngs::StdRng {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Emoji used for stickers.
pub const EMOJIS: [&str; 7] = ["❤️", "💕", "✨", "🌸", "💌", "🎀", "🧸"];

/// Colored tape strip holding a polaroid to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapeStyle {
    Pink,
    Blue,
    Yellow,
    Green,
}

impl TapeStyle {
    /// All styles in cycle order.
    pub const ALL: [TapeStyle; 4] = [
        TapeStyle::Pink,
        TapeStyle::Blue,
        TapeStyle::Yellow,
        TapeStyle::Green,
    ];

    /// Style for a photo slot; cycles with page index plus position on the page.
    pub fn for_slot(page_index: usize, photo_index: usize) -> Self {
        Self::ALL[(page_index + photo_index) % Self::ALL.len()]
    }

    /// CSS class name.
    pub fn css_class(&self) -> &'static str {
        match self {
            TapeStyle::Pink => "tape-pink",
            TapeStyle::Blue => "tape-blue",
            TapeStyle::Yellow => "tape-yellow",
            TapeStyle::Green => "tape-green",
        }
    }
}

/// Where a sticker sits around its polaroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickerPlacement {
    TopLeft,
    TopRight,
    RightSide,
    BottomLeft,
    MiddleRight,
    MiddleLeft,
}

impl StickerPlacement {
    /// All placement presets.
    pub const ALL: [StickerPlacement; 6] = [
        StickerPlacement::TopLeft,
        StickerPlacement::TopRight,
        StickerPlacement::RightSide,
        StickerPlacement::BottomLeft,
        StickerPlacement::MiddleRight,
        StickerPlacement::MiddleLeft,
    ];

    /// CSS offset properties for this preset.
    pub fn offsets(&self) -> [(&'static str, &'static str); 2] {
        match self {
            StickerPlacement::TopLeft => [("top", "-25px"), ("left", "-25px")],
            StickerPlacement::TopRight => [("top", "-30px"), ("right", "-15px")],
            StickerPlacement::RightSide => [("bottom", "90px"), ("right", "-25px")],
            StickerPlacement::BottomLeft => [("bottom", "-25px"), ("left", "0px")],
            StickerPlacement::MiddleRight => [("top", "40%"), ("right", "-35px")],
            StickerPlacement::MiddleLeft => [("top", "40%"), ("left", "-35px")],
        }
    }

    /// Rotation range in degrees, `(min, max)`.
    pub fn rotation_bounds(&self) -> (f32, f32) {
        match self {
            StickerPlacement::TopLeft => (-35.0, -15.0),
            StickerPlacement::TopRight => (15.0, 35.0),
            StickerPlacement::RightSide => (10.0, 30.0),
            StickerPlacement::BottomLeft => (-30.0, -10.0),
            StickerPlacement::MiddleRight => (0.0, 40.0),
            StickerPlacement::MiddleLeft => (-40.0, 0.0),
        }
    }
}

/// A decorative sticker attached to a polaroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    pub emoji: &'static str,
    pub placement: StickerPlacement,
    pub rotation_deg: f32,
    /// Stagger for the wobble animation, in seconds
    pub animation_delay_secs: f32,
}

impl Sticker {
    /// Draw one sticker.
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        let emoji = EMOJIS[rng.pick_index(EMOJIS.len())];
        let placement = StickerPlacement::ALL[rng.pick_index(StickerPlacement::ALL.len())];
        let (min, max) = placement.rotation_bounds();
        let rotation_deg = min + rng.next_unit() * (max - min);
        let animation_delay_secs = rng.next_unit();

        Self {
            emoji,
            placement,
            rotation_deg,
            animation_delay_secs,
        }
    }

    /// Inline style string for the sticker element.
    pub fn css_style(&self) -> String {
        let [(a, a_val), (b, b_val)] = self.placement.offsets();
        format!(
            "{a}: {a_val}; {b}: {b_val}; transform: rotate({:.1}deg); animation-delay: {:.2}s",
            self.rotation_deg, self.animation_delay_secs
        )
    }
}

/// Draw the stickers for one polaroid (between one and three).
pub fn random_stickers(rng: &mut dyn RandomSource) -> Vec<Sticker> {
    let count = 1 + rng.pick_index(3);
    (0..count).map(|_| Sticker::random(rng)).collect()
}
