use crate::components::Canvas;
use crate::config::EngineConfig;
use crate::events::{InfoPanelSink, InfoPayload};
use crate::systems::motion::approach;

/// Details panel for the focused tile. Slides in from the left and fades
/// in while active; snaps back out when cleared.
#[derive(Debug, Clone)]
pub struct InfoPanel {
    pub active: bool,
    pub payload: Option<InfoPayload>,
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
    pub width: f32,
    pub height: f32,
    start_x: f32,
    end_x: f32,
    factor: f32,
}

impl InfoPanel {
    pub fn new(canvas: Canvas, config: &EngineConfig) -> Self {
        let (slide_x, slide_y) = config.info_offset;
        let start_x = canvas.width / 2.0 - slide_x * 2.0;
        Self {
            active: false,
            payload: None,
            x: start_x,
            y: canvas.height / 2.0 + slide_y,
            alpha: 0.0,
            width: config.info_size.0,
            height: config.info_size.1,
            start_x,
            end_x: canvas.width / 2.0 - slide_x,
            factor: config.info_factor,
        }
    }

    fn reset(&mut self) {
        self.alpha = 0.0;
        self.x = self.start_x;
    }

    /// One frame of slide/fade.
    pub fn update(&mut self) {
        if self.active {
            self.alpha = approach(self.alpha, 1.0, self.factor);
            self.x = approach(self.x, self.end_x, self.factor);
        } else {
            self.reset();
        }
    }
}

impl InfoPanelSink for InfoPanel {
    fn show(&mut self, payload: Option<&InfoPayload>) {
        match payload {
            Some(p) => {
                self.reset();
                self.active = true;
                log::debug!("info panel: {} / {} ({})", p.name, p.subtitle, p.date_label);
                self.payload = Some(p.clone());
            }
            None => {
                self.active = false;
                self.payload = None;
            }
        }
    }
}
