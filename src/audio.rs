//! Audio cues for simulation events
//!
//! Procedurally generated tones - no external files needed! The tone table
//! is platform independent; playback goes through an `AudioBackend` (Web
//! Audio in the browser, a log line elsewhere).

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a paddle
    PaddleHit,
    /// Ball hits the top or bottom edge
    WallHit,
    /// A point was scored
    Score,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallBounce => Some(SoundEffect::WallHit),
            GameEvent::PaddleHit(_) => Some(SoundEffect::PaddleHit),
            GameEvent::Scored(_) => Some(SoundEffect::Score),
            GameEvent::MatchOver { .. } | GameEvent::MatchStarted => None,
        }
    }

    /// Event tag used by hosts and logs
    pub fn tag(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "hit",
            SoundEffect::WallHit => "wall",
            SoundEffect::Score => "score",
        }
    }

    /// Tone that voices this effect
    pub fn tone(&self) -> Tone {
        match self {
            // Short square blip
            SoundEffect::PaddleHit => Tone {
                frequency: 440.0,
                waveform: Waveform::Square,
                gain: 0.1,
                end_gain: 0.01,
                duration: 0.1,
            },
            // Soft low sine
            SoundEffect::WallHit => Tone {
                frequency: 220.0,
                waveform: Waveform::Sine,
                gain: 0.1,
                end_gain: 0.01,
                duration: 0.1,
            },
            // Longer, brighter triangle
            SoundEffect::Score => Tone {
                frequency: 880.0,
                waveform: Waveform::Triangle,
                gain: 0.15,
                end_gain: 0.01,
                duration: 0.3,
            },
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// A single oscillator note with an exponential gain decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    pub waveform: Waveform,
    /// Starting gain
    pub gain: f32,
    /// Gain at the end of the ramp
    pub end_gain: f32,
    /// Seconds
    pub duration: f32,
}

/// Something that can voice a tone (fire-and-forget)
pub trait AudioBackend {
    /// Play `tone` with its gains multiplied by `volume`
    fn play_tone(&self, tone: &Tone, volume: f32);

    /// Unlock output after a user gesture, where the platform needs it
    fn resume(&self) {}
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager with volumes taken from settings
    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        self.backend.resume();
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

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play_tone(&effect.tone(), vol);
    }

    /// Voice every event from a frame that has a cue
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

/// Backend that only logs what it would have played
#[derive(Debug, Default, Clone, Copy)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_tone(&self, tone: &Tone, volume: f32) {
        log::trace!(
            "tone {:?} {:.0}Hz gain {:.3} for {:.2}s",
            tone.waveform,
            tone.frequency,
            tone.gain * volume,
            tone.duration
        );
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioBackend;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioBackend, Tone, Waveform};

    /// Web Audio API backend
    pub struct WebAudioBackend {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudioBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudioBackend {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl AudioBackend for WebAudioBackend {
        fn play_tone(&self, tone: &Tone, volume: f32) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, tone.frequency, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + tone.duration as f64;

            gain.gain().set_value_at_time(tone.gain * volume, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time((tone.end_gain * volume).max(1e-4), end)
                .ok();

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }

        fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }
    }
}
