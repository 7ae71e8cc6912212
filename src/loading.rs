use std::path::Path;

use crate::components::{SizeCategory, TileRecord};
use crate::config::EngineConfig;

/// Parse a KDL file and return the document. Logs a warning and returns None on failure.
fn parse_kdl_file(path: &str) -> Option<kdl::KdlDocument> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}", path, e);
            return None;
        }
    };
    match content.parse::<kdl::KdlDocument>() {
        Ok(doc) => Some(doc),
        Err(e) => {
            log::warn!("failed to parse KDL {}: {}", path, e);
            None
        }
    }
}

/// Helper to get a string value from a child node's first argument.
fn child_str<'a>(children: &'a kdl::KdlDocument, key: &str) -> Option<&'a str> {
    children.get_arg(key)?.as_string()
}

/// `color r g b` as three integer arguments, each clamped to 0..=255.
fn child_rgb(children: &kdl::KdlDocument, key: &str) -> Option<[u8; 3]> {
    let node = children.get(key)?;
    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let v = node.get(i)?.as_integer()?;
        *channel = v.clamp(0, 255) as u8;
    }
    Some(rgb)
}

/// Width / height of the image at `path`. Unreadable media counts as square.
pub fn resolve_media_aspect(path: &Path) -> f32 {
    match image::image_dimensions(path) {
        Ok((w, h)) if w > 0 && h > 0 => w as f32 / h as f32,
        Ok(_) => {
            log::warn!("media {} has no area, treating as square", path.display());
            1.0
        }
        Err(e) => {
            log::warn!("failed to read media {}: {}, treating as square", path.display(), e);
            1.0
        }
    }
}

/// Load the tile catalog from a KDL file.
///
/// Each `tile "<name>"` node becomes one record; node order is the stable
/// id. Media paths resolve against the catalog's directory.
pub fn load_catalog(path: &str) -> Vec<TileRecord> {
    let Some(doc) = parse_kdl_file(path) else {
        return Vec::new();
    };
    let base = Path::new(path).parent().unwrap_or(Path::new("."));

    let mut records = Vec::new();
    for node in doc.nodes() {
        if node.name().to_string() != "tile" {
            continue;
        }

        let name = match node.get(0).and_then(|v| v.as_string()) {
            Some(n) => n.to_string(),
            None => {
                log::warn!("{}: tile node without a name, skipped", path);
                continue;
            }
        };

        let mut record = TileRecord::new(records.len(), &name, SizeCategory::Small);
        if let Some(children) = node.children() {
            record.body_text = child_str(children, "text").unwrap_or("").to_string();
            record.subtitle = child_str(children, "subtitle").unwrap_or("").to_string();
            record.date_label = child_str(children, "date").unwrap_or("").to_string();
            record.link_url = child_str(children, "link").unwrap_or("").to_string();
            record.media_ref = child_str(children, "image").unwrap_or("").to_string();
            record.video_id = child_str(children, "video").map(str::to_string);
            if let Some(rgb) = child_rgb(children, "color") {
                record.accent_color = rgb;
            }
            if let Some(size) = child_str(children, "size") {
                record.size_category = SizeCategory::from_label(size);
            }
        }
        if !record.media_ref.is_empty() {
            record.width_multiplier = resolve_media_aspect(&base.join(&record.media_ref));
        }
        records.push(record);
    }

    log::info!("loaded {} tiles from {}", records.len(), path);
    records
}

/// Load engine tuning from a RON file, falling back to defaults.
pub fn load_config(path: &str) -> EngineConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}, using default config", path, e);
            return EngineConfig::default();
        }
    };
    match ron::from_str::<EngineConfig>(&content) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("failed to parse RON {}: {}, using default config", path, e);
            EngineConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_catalog_from_file() {
        let records = load_catalog("data/tiles.kdl");
        assert_eq!(records.len(), 9);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.id, i);
        }
    }

    #[test]
    fn test_record_properties_correct() {
        let records = load_catalog("data/tiles.kdl");
        let sheep = records
            .iter()
            .find(|r| r.display_name == "Sheep Herder")
            .expect("sheep tile in catalog");
        assert_eq!(sheep.size_category, SizeCategory::Medium);
        assert_eq!(sheep.accent_color, [255, 128, 128]);
        assert_eq!(sheep.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert!(!sheep.link_url.is_empty());
        // Media files are not shipped with the sample catalog.
        assert_eq!(sheep.width_multiplier, 1.0);
    }

    #[test]
    fn test_unknown_size_defaults_to_small() {
        let records = load_catalog("data/tiles.kdl");
        let odd = records
            .iter()
            .find(|r| r.display_name == "Odd One")
            .expect("odd tile in catalog");
        assert_eq!(odd.size_category, SizeCategory::Small);
    }

    #[test]
    fn test_load_missing_file_no_panic() {
        assert!(load_catalog("nonexistent.kdl").is_empty());
    }

    #[test]
    fn test_load_config_from_file() {
        let cfg = load_config("data/config.ron");
        assert_eq!(cfg.grid_columns, 4);
        assert_eq!(cfg.cell_spacing, 60.0);
        assert_eq!(cfg.expanded_size, 200.0);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let cfg = load_config("nonexistent.ron");
        assert_eq!(cfg.grid_columns, EngineConfig::default().grid_columns);
    }

    #[test]
    fn test_missing_media_is_square() {
        assert_eq!(resolve_media_aspect(Path::new("no/such/image.png")), 1.0);
    }
}
