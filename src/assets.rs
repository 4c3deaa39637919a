//! Asset discovery
//!
//! The game only needs to know that its images and sounds exist and how big
//! the images are; decoding is the render surface's business. Missing
//! required assets are fatal at startup, a missing font is not.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::consts::*;
use crate::error::AssetError;

/// Named images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    ActorRising,
    ActorNeutral,
    ActorFalling,
    ObstacleTop,
    ObstacleBottom,
    Backdrop,
    Token,
}

impl ImageId {
    pub const ALL: [ImageId; 7] = [
        ImageId::ActorRising,
        ImageId::ActorNeutral,
        ImageId::ActorFalling,
        ImageId::ObstacleTop,
        ImageId::ObstacleBottom,
        ImageId::Backdrop,
        ImageId::Token,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ImageId::ActorRising => "bird_rising.png",
            ImageId::ActorNeutral => "bird.png",
            ImageId::ActorFalling => "bird_falling.png",
            ImageId::ObstacleTop => "top_pipe.png",
            ImageId::ObstacleBottom => "bottom_pipe.png",
            ImageId::Backdrop => "background.png",
            ImageId::Token => "bitcoin.png",
        }
    }
}

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Flap,
    Score,
    Ambient,
}

impl SoundId {
    pub const ALL: [SoundId; 3] = [SoundId::Flap, SoundId::Score, SoundId::Ambient];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundId::Flap => "flapp.wav",
            SoundId::Score => "cash.wav",
            SoundId::Ambient => "bitconnect.wav",
        }
    }
}

/// Pixel dimensions of a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

/// Font used for all text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontChoice {
    Custom(PathBuf),
    /// The surface's default font
    #[default]
    Builtin,
}

/// Custom font file looked up next to the other assets
pub const FONT_FILE: &str = "Ubuntu-BoldItalic.ttf";

/// Source of images, sounds and fonts
pub trait AssetProvider {
    /// Dimensions of a required image
    fn image(&self, id: ImageId) -> Result<ImageInfo, AssetError>;
    /// Confirm a required sound is available
    fn sound(&self, id: SoundId) -> Result<(), AssetError>;
    /// Font to use; never fails
    fn font(&self) -> FontChoice;
}

/// Assets read from a directory on disk
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn require(&self, kind: &'static str, file_name: &str) -> Result<PathBuf, AssetError> {
        let path = self.root.join(file_name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(AssetError::Missing { kind, path })
        }
    }
}

impl AssetProvider for AssetDir {
    fn image(&self, id: ImageId) -> Result<ImageInfo, AssetError> {
        let path = self.require("image", id.file_name())?;
        png_dimensions(&path)
    }

    fn sound(&self, id: SoundId) -> Result<(), AssetError> {
        self.require("sound", id.file_name()).map(|_| ())
    }

    fn font(&self) -> FontChoice {
        let path = self.root.join(FONT_FILE);
        if path.is_file() {
            FontChoice::Custom(path)
        } else {
            log::warn!("Font {} not found, using built-in font", path.display());
            FontChoice::Builtin
        }
    }
}

/// Fixed dimensions for running without an asset directory
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinAssets;

impl AssetProvider for BuiltinAssets {
    fn image(&self, id: ImageId) -> Result<ImageInfo, AssetError> {
        let (width, height) = match id {
            ImageId::ActorRising | ImageId::ActorNeutral | ImageId::ActorFalling => (512, 384),
            ImageId::ObstacleTop | ImageId::ObstacleBottom => (192, 640),
            ImageId::Backdrop => (1280, 720),
            ImageId::Token => (256, 256),
        };
        Ok(ImageInfo { width, height })
    }

    fn sound(&self, _id: SoundId) -> Result<(), AssetError> {
        Ok(())
    }

    fn font(&self) -> FontChoice {
        FontChoice::Builtin
    }
}

/// Read width and height from a PNG's IHDR chunk
pub fn png_dimensions(path: &Path) -> Result<ImageInfo, AssetError> {
    const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    let mut header = [0u8; 24];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut header))
        .map_err(|source| AssetError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let bad = |reason: &str| AssetError::BadImage {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    if header[..8] != SIGNATURE {
        return Err(bad("not a PNG file"));
    }
    if &header[12..16] != b"IHDR" {
        return Err(bad("missing IHDR chunk"));
    }

    let width = u32::from_be_bytes([header[16], header[17], header[18], header[19]]);
    let height = u32::from_be_bytes([header[20], header[21], header[22], header[23]]);
    if width == 0 || height == 0 {
        return Err(bad("zero-sized image"));
    }
    Ok(ImageInfo { width, height })
}

/// On-screen sizes of everything the game draws, resolved once at startup
#[derive(Debug, Clone)]
pub struct Sprites {
    /// Actor sprite (all three poses share it)
    pub actor: Vec2,
    /// Obstacle images scaled to the obstacle width
    pub obstacle_top: Vec2,
    pub obstacle_bottom: Vec2,
    /// Floating score token
    pub token: Vec2,
    pub font: FontChoice,
}

impl Sprites {
    /// Resolve every required asset; the first missing one aborts startup
    pub fn load(provider: &dyn AssetProvider) -> Result<Self, AssetError> {
        for id in ImageId::ALL {
            provider.image(id)?;
        }
        for id in SoundId::ALL {
            provider.sound(id)?;
        }

        let actor_width = (SCREEN_WIDTH * ACTOR_WIDTH_RATIO).floor();
        let actor = scale_to_width(provider.image(ImageId::ActorRising)?, actor_width);
        let top = provider.image(ImageId::ObstacleTop)?;
        let bottom = provider.image(ImageId::ObstacleBottom)?;
        let token_width = (SCREEN_WIDTH * INDICATOR_WIDTH_RATIO).floor();
        let token = scale_to_width(provider.image(ImageId::Token)?, token_width);

        let sprites = Self {
            actor,
            obstacle_top: Vec2::new(OBSTACLE_WIDTH, top.height as f32),
            obstacle_bottom: Vec2::new(OBSTACLE_WIDTH, bottom.height as f32),
            token,
            font: provider.font(),
        };
        log::debug!("Sprites resolved: {:?}", sprites);
        Ok(sprites)
    }
}

/// Scale keeping the aspect ratio, truncating to whole pixels
fn scale_to_width(info: ImageInfo, width: f32) -> Vec2 {
    let height = (width * info.height as f32 / info.width as f32).floor();
    Vec2::new(width, height)
}
