use serde::Deserialize;

/// Render frame counter. Never use raw u64 where a Frame is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Frame(pub u64);

/// Point on the canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Canvas dimensions in pixels. Fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Size class of a tile. Closed set with fixed pixel sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SizeCategory {
    #[default]
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    /// Largest base size; normalises the parallax shift.
    pub const LARGEST: f32 = SizeCategory::Large.pixels();

    pub const fn pixels(self) -> f32 {
        match self {
            SizeCategory::Small => 30.0,
            SizeCategory::Medium => 40.0,
            SizeCategory::Large => 55.0,
        }
    }

    /// Parse a catalog size label. Unknown labels fall back to `Small`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "small" => SizeCategory::Small,
            "medium" => SizeCategory::Medium,
            "large" => SizeCategory::Large,
            other => {
                log::warn!("unknown size category {:?}, using small", other);
                SizeCategory::Small
            }
        }
    }
}

/// Immutable metadata for one catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRecord {
    pub id: usize,
    pub display_name: String,
    pub body_text: String,
    pub subtitle: String,
    pub date_label: String,
    pub accent_color: [u8; 3],
    pub link_url: String,
    pub media_ref: String,
    pub video_id: Option<String>,
    pub size_category: SizeCategory,
    /// Media width / height, resolved at load time.
    pub width_multiplier: f32,
}

impl TileRecord {
    /// Minimal record with defaults for everything but identity and size.
    pub fn new(id: usize, display_name: &str, size_category: SizeCategory) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            body_text: String::new(),
            subtitle: String::new(),
            date_label: String::new(),
            accent_color: [128, 128, 128],
            link_url: String::new(),
            media_ref: String::new(),
            video_id: None,
            size_category,
            width_multiplier: 1.0,
        }
    }
}

/// Which size/target policy a tile follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileRole {
    /// Catalog tile: rests on the grid, moves to the perimeter or focus.
    Standard,
    /// Link button beside the focused tile; collapsed while idle.
    ExternalLink,
}

/// Per-tile motion state. Only the continuous fields mutate after creation.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Stable identity, equal to the record id. Never reassigned.
    pub index: usize,
    pub role: TileRole,
    pub rest_position: Vec2,
    pub position: Vec2,
    pub target_position: Vec2,
    pub size: f32,
    pub width: f32,
    pub base_size: f32,
    pub width_multiplier: f32,
    /// Result of the last hover evaluation.
    pub hovered: bool,
}

impl Tile {
    pub fn new(index: usize, rest_position: Vec2, base_size: f32, width_multiplier: f32) -> Self {
        Self {
            index,
            role: TileRole::Standard,
            rest_position,
            position: rest_position,
            target_position: rest_position,
            size: base_size,
            width: base_size,
            base_size,
            width_multiplier,
            hovered: false,
        }
    }

    pub fn external_link(position: Vec2, base_size: f32) -> Self {
        Self {
            role: TileRole::ExternalLink,
            ..Self::new(usize::MAX, position, base_size, 1.0)
        }
    }

    /// Send the tile back to its grid cell.
    pub fn reset_target(&mut self) {
        self.target_position = self.rest_position;
    }
}
