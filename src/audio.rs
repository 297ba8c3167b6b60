//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Outside the browser every cue is dropped.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// Sound cue keyed by game event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player fired
    Shoot,
    /// Enemy destroyed by a bullet
    Explosion,
    /// Star item collected
    Item,
    /// Player took shield damage
    Hit,
    /// Run ended
    GameOver,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// One oscillator burst within a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds
    pub duration: f64,
    pub waveform: Waveform,
    /// Peak gain before the volume setting is applied
    pub volume: f32,
    /// Seconds after the cue starts
    pub delay: f64,
}

const fn tone(freq: f32, duration: f64, waveform: Waveform, volume: f32, delay: f64) -> Tone {
    Tone {
        freq,
        duration,
        waveform,
        volume,
        delay,
    }
}

const SHOOT: &[Tone] = &[tone(800.0, 0.1, Waveform::Square, 0.2, 0.0)];
const EXPLOSION: &[Tone] = &[
    tone(200.0, 0.2, Waveform::Sawtooth, 0.3, 0.0),
    tone(150.0, 0.15, Waveform::Sawtooth, 0.2, 0.05),
];
const ITEM: &[Tone] = &[
    tone(600.0, 0.15, Waveform::Sine, 0.25, 0.0),
    tone(800.0, 0.1, Waveform::Sine, 0.2, 0.05),
];
const HIT: &[Tone] = &[tone(300.0, 0.2, Waveform::Square, 0.3, 0.0)];
const GAME_OVER: &[Tone] = &[
    tone(200.0, 0.3, Waveform::Sawtooth, 0.4, 0.0),
    tone(150.0, 0.3, Waveform::Sawtooth, 0.3, 0.1),
    tone(100.0, 0.3, Waveform::Sawtooth, 0.3, 0.2),
];

impl SoundCue {
    /// The tone sequence that makes up this cue
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundCue::Shoot => SHOOT,
            SoundCue::Explosion => EXPLOSION,
            SoundCue::Item => ITEM,
            SoundCue::Hit => HIT,
            SoundCue::GameOver => GAME_OVER,
        }
    }
}

/// Anything that can play a cue. Playback is fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that drops every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        log::warn!("No audio backend on this platform - audio disabled");
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Whether a playback backend exists
    #[cfg(target_arch = "wasm32")]
    pub fn is_available(&self) -> bool {
        self.ctx.is_some()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn is_available(&self) -> bool {
        false
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
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

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue
    #[cfg(target_arch = "wasm32")]
    pub fn play_cue(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let t = ctx.current_time();
        for tone in cue.tones() {
            self.play_tone(ctx, tone, t, vol);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play_cue(&self, cue: SoundCue) {
        log::trace!("dropped sound cue {cue:?}");
    }

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        waveform: Waveform,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
        });
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    #[cfg(target_arch = "wasm32")]
    fn play_tone(&self, ctx: &AudioContext, tone: &Tone, now: f64, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.waveform) else {
            return;
        };
        let start = now + tone.delay;
        let end = start + tone.duration;

        gain.gain().set_value_at_time(vol * tone.volume, start).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();

        osc.start_with_when(start).ok();
        osc.stop_with_when(end).ok();
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        self.play_cue(cue);
    }
}
