//! Procedural cue synthesis
//!
//! Every game cue is generated from a fixed tone recipe rather than a
//! prerecorded asset, so cues work with no file or network dependency.
//! A tone is a single oscillator with an exponential frequency glide, a
//! short linear attack, and an exponential decay; recipes layer tones at
//! offsets to build chimes and the win fanfare.

use std::f32::consts::PI;

/// The cue vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Tile flip: one short high pop
    Click,
    /// Pair matched: ascending sparkle chime
    Match,
    /// Pair mismatched: two soft descending tones
    Mismatch,
    /// Game won: ascending fanfare with a harmony under the last note
    Win,
}

#[derive(Debug, Clone, Copy)]
enum Waveform {
    Sine,
    Triangle,
}

/// One oscillator voice within a cue
#[derive(Debug, Clone, Copy)]
struct Tone {
    start_hz: f32,
    end_hz: f32,
    wave: Waveform,
    /// Seconds into the cue this tone starts
    onset: f32,
    /// Seconds the tone sounds for
    duration: f32,
    /// Peak amplitude (pre-mix)
    level: f32,
}

const fn steady(hz: f32, wave: Waveform, onset: f32, duration: f32, level: f32) -> Tone {
    Tone {
        start_hz: hz,
        end_hz: hz,
        wave,
        onset,
        duration,
        level,
    }
}

const fn glide(start_hz: f32, end_hz: f32, onset: f32, duration: f32, level: f32) -> Tone {
    Tone {
        start_hz,
        end_hz,
        wave: Waveform::Sine,
        onset,
        duration,
        level,
    }
}

// Percussive pop, like tapping a plastic toy.
const CLICK: [Tone; 1] = [steady(800.0, Waveform::Sine, 0.0, 0.05, 0.15)];

// A5 / C#6 / E6 sparkle.
const MATCH: [Tone; 3] = [
    steady(880.00, Waveform::Sine, 0.0, 0.1, 0.05),
    steady(1108.73, Waveform::Sine, 0.08, 0.1, 0.05),
    steady(1318.51, Waveform::Sine, 0.16, 0.4, 0.08),
];

// "Uh-oh": G4 then D4, each sagging slightly. No harsh buzzer.
const MISMATCH: [Tone; 2] = [
    glide(392.00, 370.00, 0.0, 0.15, 0.1),
    glide(293.66, 261.63, 0.2, 0.3, 0.1),
];

// C-E-G-C major run, last note held with a C5 harmony underneath.
const WIN: [Tone; 5] = [
    steady(523.25, Waveform::Triangle, 0.0, 0.1, 0.1),
    steady(659.25, Waveform::Triangle, 0.1, 0.1, 0.1),
    steady(783.99, Waveform::Triangle, 0.2, 0.1, 0.1),
    steady(1046.50, Waveform::Triangle, 0.3, 0.6, 0.1),
    steady(523.25, Waveform::Sine, 0.3, 0.6, 0.1),
];

/// Attack portion of each tone's envelope
const ATTACK_FRACTION: f32 = 0.1;
/// Decay target; -60dB, effectively silent
const DECAY_FLOOR: f32 = 0.001;

fn recipe(kind: EffectKind) -> &'static [Tone] {
    match kind {
        EffectKind::Click => &CLICK,
        EffectKind::Match => &MATCH,
        EffectKind::Mismatch => &MISMATCH,
        EffectKind::Win => &WIN,
    }
}

/// Total length of a cue in seconds
pub fn duration_secs(kind: EffectKind) -> f32 {
    recipe(kind)
        .iter()
        .map(|t| t.onset + t.duration)
        .fold(0.0, f32::max)
}

/// Render a cue to mono samples at the given rate
pub fn render(kind: EffectKind, sample_rate: u32) -> Vec<f32> {
    let sr = sample_rate as f32;
    let total = (duration_secs(kind) * sr).ceil() as usize;
    let mut buffer = vec![0.0f32; total];

    for tone in recipe(kind) {
        let start = (tone.onset * sr) as usize;
        let len = (tone.duration * sr) as usize;
        let attack = tone.duration * ATTACK_FRACTION;
        let mut phase = 0.0f32;

        for i in 0..len {
            let t = i as f32 / sr;
            // Exponential glide between the endpoint frequencies.
            let freq = if (tone.start_hz - tone.end_hz).abs() < f32::EPSILON {
                tone.start_hz
            } else {
                tone.start_hz * (tone.end_hz / tone.start_hz).powf(t / tone.duration)
            };
            phase += 2.0 * PI * freq / sr;

            let env = if t < attack {
                // Linear ramp in from near-silence.
                0.01 + (tone.level - 0.01) * (t / attack)
            } else {
                // Exponential decay down to the floor by the end of the tone.
                let frac = (t - attack) / (tone.duration - attack);
                tone.level * (DECAY_FLOOR / tone.level).powf(frac)
            };

            let sample = match tone.wave {
                Waveform::Sine => phase.sin(),
                Waveform::Triangle => (2.0 / PI) * phase.sin().asin(),
            };
            let slot = start + i;
            if slot < buffer.len() {
                buffer[slot] += sample * env;
            }
        }
    }

    for sample in &mut buffer {
        *sample = sample.clamp(-1.0, 1.0);
    }
    buffer
}
