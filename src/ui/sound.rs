/// Sound engine: procedural chiptune cues via rodio.
///
/// Every cue is rendered to an in-memory WAV buffer at init time and
/// played fire-and-forget through a detached rodio Sink.
///
/// Without the "sound" feature the stub SoundEngine does nothing, but the
/// event-to-cue mapping below is always compiled.

use crate::sim::event::GameEvent;

/// One sound effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Pop,
    Dodge,
    Tick,
    Miss,
    Error,
    Flip,
    Win,
    Fail,
    Accept,
}

impl Cue {
    #[cfg_attr(not(feature = "sound"), allow(dead_code))]
    const ALL: [Cue; 9] = [
        Cue::Pop, Cue::Dodge, Cue::Tick, Cue::Miss, Cue::Error,
        Cue::Flip, Cue::Win, Cue::Fail, Cue::Accept,
    ];

    /// Which cue, if any, an event should make.
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::HeartPopped { .. } | GameEvent::PatternStep { .. } => Some(Cue::Pop),
            GameEvent::Dodged | GameEvent::DeclineDodged { .. } => Some(Cue::Dodge),
            // only the last few seconds tick audibly
            GameEvent::CountdownTick { seconds_left } if *seconds_left <= 3 => Some(Cue::Tick),
            GameEvent::ItemMissed { .. } => Some(Cue::Miss),
            GameEvent::WrongGuess { .. } | GameEvent::PatternError => Some(Cue::Error),
            GameEvent::CardFlipped { .. } | GameEvent::TileRotated => Some(Cue::Flip),
            GameEvent::LevelWon { .. } => Some(Cue::Win),
            GameEvent::LevelFailed { .. } => Some(Cue::Fail),
            GameEvent::Accepted => Some(Cue::Accept),
            _ => None,
        }
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::Cue;

    const SAMPLE_RATE: u32 = 22050;
    const TAU: f32 = std::f32::consts::TAU;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        /// Indexed by `Cue as usize`.
        buffers: Vec<Arc<Vec<u8>>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("audio output unavailable: {e}");
                    return None;
                }
            };
            let buffers = Cue::ALL.iter()
                .map(|&cue| Arc::new(make_wav(&render(cue))))
                .collect();
            Some(SoundEngine { _stream: stream, handle, buffers })
        }

        pub fn play(&self, cue: Cue) {
            let Some(buf) = self.buffers.get(cue as usize) else { return };
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }
    }

    fn render(cue: Cue) -> Vec<f32> {
        match cue {
            Cue::Pop => arpeggio(&[880.0, 1319.0], 0.04, 0.25),
            Cue::Dodge => sweep(900.0, 300.0, 0.12, 0.2),
            Cue::Tick => tone(1000.0, 0.03, 0.2),
            Cue::Miss => sweep(400.0, 180.0, 0.15, 0.25),
            Cue::Error => noise_buzz(0.18),
            Cue::Flip => tone(660.0, 0.05, 0.2),
            Cue::Win => fanfare(),
            Cue::Fail => arpeggio(&[440.0, 370.0, 311.0, 261.0], 0.12, 0.3),
            Cue::Accept => {
                let mut s = fanfare();
                s.extend(arpeggio(&[1047.0, 1319.0, 1568.0, 2093.0], 0.08, 0.25));
                s
            }
        }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators: all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    fn samples_for(duration: f32) -> usize {
        (SAMPLE_RATE as f32 * duration) as usize
    }

    /// Sine blip with a linear fade out.
    fn tone(freq: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = samples_for(duration);
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32);
                (t * freq * TAU).sin() * env * volume
            })
            .collect()
    }

    /// Notes in sequence, sine plus a third harmonic for a retro edge.
    fn arpeggio(notes: &[f32], note_dur: f32, volume: f32) -> Vec<f32> {
        let n = samples_for(note_dur);
        let mut samples = Vec::with_capacity(n * notes.len());
        for &freq in notes {
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                let wave = (t * freq * TAU).sin() * 0.7 + (t * freq * 3.0 * TAU).sin() * 0.3;
                samples.push(wave * env * volume);
            }
        }
        samples
    }

    /// Linear pitch slide.
    fn sweep(from: f32, to: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = samples_for(duration);
        let mut phase = 0.0_f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = from + (to - from) * t;
                phase += freq / SAMPLE_RATE as f32;
                let env = (1.0 - t).powf(0.6);
                (phase * TAU).sin() * env * volume
            })
            .collect()
    }

    /// Low tone mixed with LCG noise.
    fn noise_buzz(duration: f32) -> Vec<f32> {
        let n = samples_for(duration);
        let mut rng: u32 = 12345;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let tone = (ti * 150.0 * TAU).sin();
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                (tone * 0.6 + noise * 0.4) * (1.0 - t) * 0.3
            })
            .collect()
    }

    /// C5→E5→G5→C6 with a sustained top note.
    fn fanfare() -> Vec<f32> {
        let mut samples = arpeggio(&[523.0, 659.0, 784.0], 0.1, 0.3);
        samples.extend(tone(1047.0, 0.3, 0.3));
        samples
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder: wraps f32 samples into a 16-bit PCM buffer
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2;
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn wav_header_matches_payload() {
            let wav = make_wav(&render(Cue::Pop));
            assert_eq!(&wav[0..4], b"RIFF");
            assert_eq!(&wav[8..12], b"WAVE");
            let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]) as usize;
            assert_eq!(wav.len(), 44 + data_size);
        }

        #[test]
        fn every_cue_renders_audible_samples() {
            for cue in Cue::ALL {
                let s = render(cue);
                assert!(!s.is_empty(), "{cue:?}");
                assert!(s.iter().all(|v| v.abs() <= 1.0), "{cue:?}");
            }
        }
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play(&self, _cue: Cue) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::level::LevelIndex;

    #[test]
    fn countdown_only_ticks_near_the_end() {
        assert_eq!(Cue::for_event(&GameEvent::CountdownTick { seconds_left: 7 }), None);
        assert_eq!(Cue::for_event(&GameEvent::CountdownTick { seconds_left: 3 }), Some(Cue::Tick));
    }

    #[test]
    fn outcomes_have_distinct_cues() {
        let level = LevelIndex::FIRST;
        assert_eq!(Cue::for_event(&GameEvent::LevelWon { level }), Some(Cue::Win));
        assert_eq!(Cue::for_event(&GameEvent::LevelFailed { level }), Some(Cue::Fail));
        assert_eq!(Cue::for_event(&GameEvent::Accepted), Some(Cue::Accept));
        assert_eq!(Cue::for_event(&GameEvent::LevelStarted { level }), None);
    }
}
