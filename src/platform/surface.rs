//! Render surfaces

use crate::renderer::vertex::Vertex;
use crate::renderer::{DrawCommand, DrawList};

/// Something that can show a finished frame
pub trait RenderSurface {
    fn present(&mut self, frame: DrawList);
}

/// Surface that keeps the last frame instead of drawing it
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pub frames: u64,
    /// Vertex bytes a GPU surface would have uploaded so far
    pub mesh_bytes: u64,
    pub last: Option<DrawList>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for HeadlessSurface {
    fn present(&mut self, frame: DrawList) {
        self.frames += 1;
        let mut texts = 0;
        for cmd in &frame.commands {
            match cmd {
                DrawCommand::Mesh { vertices, .. } => {
                    self.mesh_bytes += Vertex::as_bytes(vertices).len() as u64;
                }
                DrawCommand::Text { .. } => texts += 1,
                _ => {}
            }
        }
        log::trace!(
            "frame {}: {} commands ({} text, font {:?})",
            self.frames,
            frame.len(),
            texts,
            frame.font
        );
        self.last = Some(frame);
    }
}
