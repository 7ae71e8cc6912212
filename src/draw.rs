/// Intermediate draw command for a panel quad.
/// Uploaded as one instance by `QuadRenderer::prepare()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelCommand {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub bg_color: [f32; 4],     // sRGB RGBA
    pub border_color: [f32; 4], // sRGB RGBA
    pub border_width: f32,
    pub corner_radius: f32,
}

/// Collects draw commands for one frame, back to front.
/// Decouples engine state from the GPU renderer.
#[derive(Debug, Default)]
pub struct DrawList {
    pub panels: Vec<PanelCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self { panels: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.panels.clear();
    }
}

/// Convert an 8-bit RGB colour to sRGB [f32; 4] with the given alpha.
pub const fn rgb(c: [u8; 3], a: f32) -> [f32; 4] {
    [
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
        a,
    ]
}
