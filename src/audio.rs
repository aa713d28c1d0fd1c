//! Procedurally generated sound effects - no external files needed!
//!
//! Every cue maps to a fixed tone table: a waveform and one or more
//! (frequency, duration) notes played back to back, each with a short
//! exponential decay. Playback is fire-and-forget; a missing audio backend
//! only means silence.

use crate::settings::Settings;
use crate::sim::Cue;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Sample the waveform at a phase in cycles (fractional part is used)
    pub fn sample(self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (p * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * p - 1.0,
        }
    }
}

/// One note of a tone: frequency in Hz, duration in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    pub duration: f32,
}

const fn note(freq: f32, duration: f32) -> Note {
    Note { freq, duration }
}

/// Designed parameters for one cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub notes: &'static [Note],
}

impl Tone {
    /// Total length in seconds
    pub fn duration(&self) -> f32 {
        self.notes.iter().map(|n| n.duration).sum()
    }
}

/// Gain at note onset
pub const START_GAIN: f32 = 0.5;
/// Gain the exponential decay reaches at note end
pub const END_GAIN: f32 = 0.001;

const PADDLE_NOTES: &[Note] = &[note(261.63, 0.1)];
const BRICK_NOTES: &[Note] = &[note(523.25, 0.05)];
const WALL_NOTES: &[Note] = &[note(110.0, 0.05)];
const LOSE_LIFE_NOTES: &[Note] = &[note(130.81, 0.3)];
// Descending minor run
const GAME_OVER_NOTES: &[Note] = &[
    note(174.61, 0.15),
    note(164.81, 0.15),
    note(155.56, 0.15),
    note(146.83, 0.2),
];
// C major arpeggio up to the octave
const WIN_NOTES: &[Note] = &[
    note(523.25, 0.1),
    note(659.25, 0.1),
    note(783.99, 0.1),
    note(1046.5, 0.2),
];

/// Tone table lookup
pub fn tone_for(cue: Cue) -> Tone {
    match cue {
        Cue::Paddle => Tone {
            waveform: Waveform::Square,
            notes: PADDLE_NOTES,
        },
        Cue::Brick => Tone {
            waveform: Waveform::Sine,
            notes: BRICK_NOTES,
        },
        Cue::Wall => Tone {
            waveform: Waveform::Triangle,
            notes: WALL_NOTES,
        },
        Cue::LoseLife => Tone {
            waveform: Waveform::Sawtooth,
            notes: LOSE_LIFE_NOTES,
        },
        Cue::GameOver => Tone {
            waveform: Waveform::Sawtooth,
            notes: GAME_OVER_NOTES,
        },
        Cue::Win => Tone {
            waveform: Waveform::Sawtooth,
            notes: WIN_NOTES,
        },
    }
}

/// Envelope gain `t` seconds into a note lasting `duration` seconds
pub fn envelope(t: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    let progress = (t / duration).clamp(0.0, 1.0);
    START_GAIN * (END_GAIN / START_GAIN).powf(progress)
}

/// Render a tone to mono PCM samples in [-1, 1]
pub fn render_samples(tone: &Tone, sample_rate: u32, volume: f32) -> Vec<f32> {
    let sr = sample_rate as f32;
    let total = (tone.duration() * sr).ceil() as usize;
    let mut samples = Vec::with_capacity(total);

    for n in tone.notes {
        let count = (n.duration * sr).round() as usize;
        for i in 0..count {
            let t = i as f32 / sr;
            let value = tone.waveform.sample(n.freq * t) * envelope(t, n.duration);
            samples.push(value * volume);
        }
    }

    samples
}

/// Volume controls shared by every player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    pub master: f32,
    pub sfx: f32,
    pub muted: bool,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            master: 0.8,
            sfx: 1.0,
            muted: false,
        }
    }
}

impl Volume {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master: settings.master_volume.clamp(0.0, 1.0),
            sfx: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Get effective volume
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master * self.sfx
        }
    }
}

/// Plays a short sound for each cue. Must never fail loudly.
pub trait TonePlayer {
    fn play(&mut self, cue: Cue);

    /// Stop producing sound while the game is paused
    fn suspend(&mut self) {}

    fn resume(&mut self) {}
}

/// Player for headless runs: renders each tone and logs it
#[derive(Debug, Default)]
pub struct LogTonePlayer {
    pub volume: Volume,
    pub suspended: bool,
    /// Samples rendered so far (at 44.1 kHz)
    pub rendered: usize,
}

impl LogTonePlayer {
    pub const SAMPLE_RATE: u32 = 44_100;

    pub fn new(volume: Volume) -> Self {
        Self {
            volume,
            ..Self::default()
        }
    }
}

impl TonePlayer for LogTonePlayer {
    fn play(&mut self, cue: Cue) {
        let vol = self.volume.effective();
        if self.suspended || vol <= 0.0 {
            return;
        }
        let tone = tone_for(cue);
        let samples = render_samples(&tone, Self::SAMPLE_RATE, vol);
        self.rendered += samples.len();
        log::debug!(
            "tone {:?}: {:?} x{} notes, {:.2}s",
            cue,
            tone.waveform,
            tone.notes.len(),
            tone.duration()
        );
    }

    fn suspend(&mut self) {
        self.suspended = true;
    }

    fn resume(&mut self) {
        self.suspended = false;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{END_GAIN, START_GAIN, TonePlayer, Volume, Waveform, tone_for};
    use crate::sim::Cue;

    /// Web Audio player
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: Volume,
    }

    impl AudioManager {
        pub fn new(volume: Volume) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            waveform: Waveform,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl TonePlayer for AudioManager {
        fn play(&mut self, cue: Cue) {
            let vol = self.volume.effective();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            let tone = tone_for(cue);
            let mut t = ctx.current_time();
            for n in tone.notes {
                let duration = n.duration as f64;
                if let Some((osc, gain)) = Self::create_osc(ctx, tone.waveform) {
                    osc.frequency().set_value_at_time(n.freq, t).ok();
                    gain.gain().set_value_at_time(START_GAIN * vol, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(END_GAIN, t + duration)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + duration).ok();
                }
                t += duration;
            }
        }

        fn suspend(&mut self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == AudioContextState::Running {
                    let _ = ctx.suspend();
                }
            }
        }

        /// Resume audio context (required after user gesture)
        fn resume(&mut self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }
    }
}
