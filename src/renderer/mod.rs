//! Draw-command rendering
//!
//! Turns a `GameState` into an ordered list of draw commands against the
//! fixed 1280x720 canvas. Executing them (blitting images, filling meshes,
//! rasterising text) is the render surface's job.

pub mod shapes;
pub mod vertex;

use std::rc::Rc;

use glam::Vec2;

use crate::assets::{FontChoice, ImageId, Sprites};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Pose};
use vertex::{Vertex, colors};

/// HUD and game-over font size in pixels
pub const FONT_SIZE: f32 = 54.0;
/// Motion blur copies are this much wider than the sprite
const BLUR_STRETCH: f32 = 1.1;
/// ...and drawn this far behind the sample position
const BLUR_OFFSET: f32 = 25.0;
/// Opacity of the newest blur copy as `i / len` approaches 1
const BLUR_MAX_ALPHA: f32 = 100.0;

/// How a text position is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Text box centred on the point
    Center,
    /// Point is the middle of the top edge
    TopCenter,
    TopLeft,
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole canvas
    Clear([f32; 4]),
    /// Blit an image scaled to `size` with its top-left corner at `pos`.
    /// `rotation` is in degrees, counter-clockwise, about the image centre.
    Image {
        id: ImageId,
        pos: Vec2,
        size: Vec2,
        alpha: u8,
        rotation: f32,
    },
    /// Filled triangle list, modulated by `alpha`
    Mesh { vertices: Rc<[Vertex]>, alpha: u8 },
    Text {
        text: String,
        pos: Vec2,
        anchor: Anchor,
        size: f32,
        color: [f32; 4],
        /// Glow drawn behind the text, if any
        glow: Option<[f32; 4]>,
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    /// Font for every text command in the list
    pub font: FontChoice,
}

impl DrawList {
    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All image commands for the given image, in draw order
    pub fn images(&self, id: ImageId) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |c| matches!(c, DrawCommand::Image { id: i, .. } if *i == id))
    }

    /// Text of every text command, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Sprite image for an actor pose
pub fn pose_image(pose: Pose) -> ImageId {
    match pose {
        Pose::Rising => ImageId::ActorRising,
        Pose::Neutral => ImageId::ActorNeutral,
        Pose::Falling => ImageId::ActorFalling,
    }
}

/// HUD score label
pub fn wallet_label(score: u32) -> String {
    format!("Wallet: {score}.00 BTC")
}

/// Builds draw lists from game state
pub struct FrameRenderer {
    /// Ambient overlay gradient, built once
    overlay: Rc<[Vertex]>,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRenderer {
    pub fn new() -> Self {
        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        let max_radius = center.length();
        // Dark in the middle, fading out half a unit of alpha per pixel
        let overlay = shapes::radial_gradient(center, max_radius, 32, 48, colors::OVERLAY, |r| {
            (255.0 - r / 2.0).max(0.0) / 255.0
        });
        Self {
            overlay: overlay.into(),
        }
    }

    /// Draw one frame. `fps` is shown when given.
    pub fn render(
        &self,
        state: &GameState,
        sprites: &Sprites,
        settings: &Settings,
        fps: Option<u32>,
    ) -> DrawList {
        let mut list = DrawList {
            font: sprites.font.clone(),
            ..Default::default()
        };
        match state.phase {
            GamePhase::Playing => self.draw_playing(&mut list, state, sprites, settings),
            GamePhase::AwaitingRestart => draw_game_over(&mut list, state),
        }
        if let Some(fps) = fps {
            list.push(DrawCommand::Text {
                text: format!("{fps} FPS"),
                pos: Vec2::new(10.0, 10.0),
                anchor: Anchor::TopLeft,
                size: 24.0,
                color: colors::FPS,
                glow: None,
            });
        }
        list
    }

    fn draw_playing(
        &self,
        list: &mut DrawList,
        state: &GameState,
        sprites: &Sprites,
        settings: &Settings,
    ) {
        for x in state.backdrop.tiles {
            list.push(DrawCommand::Image {
                id: ImageId::Backdrop,
                pos: Vec2::new(x, 0.0),
                size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                alpha: 255,
                rotation: 0.0,
            });
        }

        draw_actor(list, state, sprites, settings.quality.motion_blur_enabled());

        for obstacle in &state.obstacles {
            list.push(DrawCommand::Image {
                id: ImageId::ObstacleTop,
                pos: Vec2::new(obstacle.x, obstacle.top_height - sprites.obstacle_top.y),
                size: sprites.obstacle_top,
                alpha: 255,
                rotation: 0.0,
            });
            list.push(DrawCommand::Image {
                id: ImageId::ObstacleBottom,
                pos: Vec2::new(obstacle.x, obstacle.gap_bottom()),
                size: sprites.obstacle_bottom,
                alpha: 255,
                rotation: 0.0,
            });
        }

        if settings.quality.overlay_enabled() {
            list.push(DrawCommand::Mesh {
                vertices: Rc::clone(&self.overlay),
                alpha: state.overlay.alpha(),
            });
        }

        for indicator in state.indicators.iter().filter(|i| i.alpha > 0) {
            list.push(DrawCommand::Image {
                id: ImageId::Token,
                pos: indicator.pos,
                size: sprites.token,
                alpha: indicator.alpha,
                rotation: 0.0,
            });
        }

        let scale = if settings.effective_score_pulse() {
            state.score_scale
        } else {
            1.0
        };
        let pulsing = (scale - 1.0).abs() > f32::EPSILON;
        list.push(DrawCommand::Text {
            text: wallet_label(state.score),
            pos: Vec2::new(SCREEN_WIDTH / 2.0, 50.0),
            anchor: Anchor::Center,
            size: FONT_SIZE * scale,
            color: colors::WHITE,
            glow: (!pulsing).then_some(colors::BLACK),
        });
    }
}

fn draw_actor(list: &mut DrawList, state: &GameState, sprites: &Sprites, blur: bool) {
    let actor = &state.actor;
    let image = pose_image(actor.pose);

    if blur {
        let len = actor.history.len();
        let size = Vec2::new((sprites.actor.x * BLUR_STRETCH).floor(), sprites.actor.y);
        for (i, sample) in actor.history.iter().take(len.saturating_sub(1)).enumerate() {
            let alpha = (BLUR_MAX_ALPHA * i as f32 / len as f32) as u8;
            if alpha == 0 {
                continue;
            }
            list.push(DrawCommand::Image {
                id: image,
                pos: Vec2::new(sample.pos.x - BLUR_OFFSET, sample.pos.y),
                size,
                alpha,
                rotation: 0.0,
            });
        }
    }

    let mut particles = Vec::new();
    for p in actor.particles.iter().filter(|p| p.is_visible()) {
        let h = p.size.trunc();
        if h <= 0.0 {
            continue;
        }
        let radii = Vec2::new(h, h / 2.0);
        let center = p.pos.trunc() + radii;
        particles.extend(shapes::ellipse(center, radii, colors::WHITE, 12));
    }
    if !particles.is_empty() {
        list.push(DrawCommand::Mesh {
            vertices: particles.into(),
            alpha: 255,
        });
    }

    list.push(DrawCommand::Image {
        id: image,
        pos: actor.pos,
        size: sprites.actor,
        alpha: 255,
        rotation: actor.tilt_degrees(),
    });
}

fn draw_game_over(list: &mut DrawList, state: &GameState) {
    list.push(DrawCommand::Clear(colors::BLACK));

    let cx = SCREEN_WIDTH / 2.0;
    let mid = SCREEN_HEIGHT / 2.0;
    let lines = [
        ("Game Over".to_string(), SCREEN_HEIGHT / 4.0, colors::GAME_OVER),
        (format!("Wallet: {} BTC", state.score), mid - 50.0, colors::WHITE),
        (
            format!("Most BTC mined: {} BTC", state.best_score),
            mid,
            colors::WHITE,
        ),
        ("Press SPACE to Restart".to_string(), mid + 50.0, colors::WHITE),
    ];
    for (text, y, color) in lines {
        list.push(DrawCommand::Text {
            text,
            pos: Vec2::new(cx, y),
            anchor: Anchor::TopCenter,
            size: FONT_SIZE,
            color,
            glow: None,
        });
    }
}
