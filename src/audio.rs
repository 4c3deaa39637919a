//! Audio cue dispatch
//!
//! The simulation never plays sounds itself. It reports events, and the
//! session maps them to cues here and hands them to an `AudioSink`.

use crate::assets::SoundId;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound cues the game plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Actor flapped
    Flap,
    /// Obstacle cleared
    Score,
    /// Background loop, started once
    Ambient,
}

impl Cue {
    /// Mix volume before master/sfx scaling
    pub fn base_volume(&self) -> f32 {
        match self {
            Cue::Flap => 0.3,
            Cue::Score => 0.18,
            Cue::Ambient => 0.05,
        }
    }

    pub fn looping(&self) -> bool {
        matches!(self, Cue::Ambient)
    }

    pub fn sound(&self) -> SoundId {
        match self {
            Cue::Flap => SoundId::Flap,
            Cue::Score => SoundId::Score,
            Cue::Ambient => SoundId::Ambient,
        }
    }

    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Flapped => Some(Cue::Flap),
            GameEvent::Scored { .. } => Some(Cue::Score),
            _ => None,
        }
    }
}

/// Output device for cues
pub trait AudioSink {
    fn play(&mut self, cue: Cue, volume: f32) -> Result<(), String>;
}

/// Sink that only logs; used when there is no audio device
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue, volume: f32) -> Result<(), String> {
        log::trace!(
            "cue {:?} ({}) at {:.3}{}",
            cue,
            cue.sound().file_name(),
            volume,
            if cue.looping() { " looping" } else { "" }
        );
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Pick up volume and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Number of cues handed to the sink so far
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Play a cue. Sink failures are logged and otherwise ignored.
    pub fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume() * cue.base_volume();
        if vol <= 0.0 {
            return;
        }
        match self.sink.play(cue, vol) {
            Ok(()) => self.played += 1,
            Err(e) => log::warn!("Failed to play {:?}: {}", cue, e),
        }
    }

    /// Play the cues for a batch of simulation events
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(Cue::for_event) {
            self.play(cue);
        }
    }
}
