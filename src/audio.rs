//! Audio command surface
//!
//! The mixer owns no audio device. It turns simulation feedback events into
//! named-effect commands and music transport requests that the host's audio
//! backend drains each frame. Effects are fire-and-forget: a backend with no
//! free channel just drops them.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::state::GameEvent;

/// Sound effect names the backend maps to loaded samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fires the primary laser
    LaserFire,
    /// Player fires a rocket
    RocketFire,
    /// Enemy retaliation laser
    EnemyLaserFire,
    /// Any entity takes a hit
    Damage,
    /// An entity's destruction burst
    Destroyed,
    /// A health pickup lands
    Heal,
}

/// Opaque handle to a loaded music track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackId(pub u32);

/// One request for the host's audio backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    /// Best-effort one-shot at the given pre-mixed volume
    PlayEffect { effect: SoundEffect, volume: f32 },
    /// Loop a background track indefinitely
    PlayLoop { track: TrackId, volume: f32 },
    StopMusic,
    PauseMusic,
    ResumeMusic,
    SetMusicVolume(f32),
}

/// Audio mixer: volumes, mute state and the per-frame command queue
#[derive(Debug, Clone)]
pub struct AudioMixer {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    queue: Vec<AudioCommand>,
}

impl AudioMixer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            queue: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0); takes effect on the playing track
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        let volume = self.effective_music_volume();
        self.queue.push(AudioCommand::SetMusicVolume(volume));
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let volume = self.effective_music_volume();
        self.queue.push(AudioCommand::SetMusicVolume(volume));
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Queue the effect for a single simulation event. Rumble is input
    /// feedback, not audio, and is ignored here.
    pub fn handle_event(&mut self, event: GameEvent) {
        let effect = match event {
            GameEvent::LaserFired => SoundEffect::LaserFire,
            GameEvent::RocketFired => SoundEffect::RocketFire,
            GameEvent::EnemyLaserFired => SoundEffect::EnemyLaserFire,
            GameEvent::EntityDamaged => SoundEffect::Damage,
            GameEvent::EntityDestroyed => SoundEffect::Destroyed,
            GameEvent::EntityHealed => SoundEffect::Heal,
            GameEvent::Rumble { .. } => return,
        };
        let volume = self.effective_sfx_volume();
        if volume <= 0.0 {
            return;
        }
        self.queue.push(AudioCommand::PlayEffect { effect, volume });
    }

    /// Queue all of a tick's events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.handle_event(*event);
        }
    }

    /// Loop a background track
    pub fn play_music(&mut self, track: TrackId) {
        let volume = self.effective_music_volume();
        self.queue.push(AudioCommand::PlayLoop { track, volume });
    }

    pub fn stop_music(&mut self) {
        self.queue.push(AudioCommand::StopMusic);
    }

    pub fn pause_music(&mut self) {
        self.queue.push(AudioCommand::PauseMusic);
    }

    pub fn resume_music(&mut self) {
        self.queue.push(AudioCommand::ResumeMusic);
    }

    /// Hand the queued commands to the backend
    pub fn drain(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.queue)
    }
}
