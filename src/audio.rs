//! Sound effects and background music.
//!
//! Every clip is a plain sine wave written straight into an `i16` buffer once
//! at startup.  Playback goes through rodio when the `audio` feature is
//! enabled and an output device opens; otherwise [`Audio`] is a silent no-op.

use std::f32::consts::TAU;

pub const SAMPLE_RATE: u32 = 22_050;
/// Peak sample value for every generated clip.
pub const AMPLITUDE: f32 = 4096.0;

/// Fire-and-forget triggers emitted by the game core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEvent {
    Shoot,
    Hit,
    GameOver,
}

impl SoundEvent {
    /// `(frequency in Hz, duration in ms)`
    pub fn tone_spec(self) -> (f32, u32) {
        match self {
            SoundEvent::Shoot => (880.0, 100),
            SoundEvent::Hit => (440.0, 150),
            SoundEvent::GameOver => (220.0, 500),
        }
    }
}

/// Background arpeggio, C major, looped.
const MUSIC_NOTES: [(f32, u32); 4] = [(261.63, 200), (329.63, 200), (392.0, 200), (523.25, 400)];

/// One sine tone: `AMPLITUDE · sin(2π · f · t)`.
pub fn tone(frequency_hz: f32, duration_ms: u32, sample_rate: u32) -> Vec<i16> {
    let num_samples = (u64::from(sample_rate) * u64::from(duration_ms) / 1000) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (AMPLITUDE * (TAU * frequency_hz * t).sin()) as i16
        })
        .collect()
}

pub fn music_loop(sample_rate: u32) -> Vec<i16> {
    MUSIC_NOTES
        .iter()
        .flat_map(|&(freq, ms)| tone(freq, ms, sample_rate))
        .collect()
}

/// Pre-rendered clips, built once.
#[derive(Clone, Debug)]
pub struct SoundBank {
    pub shoot: Vec<i16>,
    pub hit: Vec<i16>,
    pub game_over: Vec<i16>,
    pub music: Vec<i16>,
}

impl SoundBank {
    pub fn generate(sample_rate: u32) -> Self {
        let render = |event: SoundEvent| {
            let (freq, ms) = event.tone_spec();
            tone(freq, ms, sample_rate)
        };
        SoundBank {
            shoot: render(SoundEvent::Shoot),
            hit: render(SoundEvent::Hit),
            game_over: render(SoundEvent::GameOver),
            music: music_loop(sample_rate),
        }
    }

    pub fn clip(&self, event: SoundEvent) -> &[i16] {
        match event {
            SoundEvent::Shoot => &self.shoot,
            SoundEvent::Hit => &self.hit,
            SoundEvent::GameOver => &self.game_over,
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

pub struct Audio {
    bank: SoundBank,
    /// Opened once; `None` means every call is silent.
    backend: Option<backend::Backend>,
    music_on: bool,
}

impl Audio {
    /// Generate the clips and try to open the default output device.
    pub fn new(music_on: bool) -> Self {
        let bank = SoundBank::generate(SAMPLE_RATE);
        let backend = backend::Backend::open(&bank);
        let mut audio = Audio {
            bank,
            backend,
            music_on: false,
        };
        audio.set_music(music_on);
        audio
    }

    /// Never produces sound.
    pub fn silent() -> Self {
        Audio {
            bank: SoundBank::generate(SAMPLE_RATE),
            backend: None,
            music_on: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    pub fn play(&self, event: SoundEvent) {
        if let Some(backend) = &self.backend {
            backend.play(self.bank.clip(event));
        }
    }

    pub fn set_music(&mut self, on: bool) {
        self.music_on = on;
        if let Some(backend) = &self.backend {
            backend.set_music(on);
        }
    }
}

#[cfg(feature = "audio")]
mod backend {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

    use super::{SoundBank, SAMPLE_RATE};

    pub(super) struct Backend {
        // Dropping the stream stops all output.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Sink,
    }

    impl Backend {
        pub(super) fn open(bank: &SoundBank) -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::warn!("audio disabled, no output device: {e}");
                    return None;
                }
            };
            let music = match Sink::try_new(&handle) {
                Ok(sink) => sink,
                Err(e) => {
                    tracing::warn!("audio disabled, cannot create sink: {e}");
                    return None;
                }
            };
            music.pause();
            music.append(SamplesBuffer::new(1, SAMPLE_RATE, bank.music.clone()).repeat_infinite());
            tracing::info!("audio output opened");
            Some(Backend {
                _stream: stream,
                handle,
                music,
            })
        }

        pub(super) fn play(&self, samples: &[i16]) {
            let source = SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()).convert_samples();
            if let Err(e) = self.handle.play_raw(source) {
                tracing::debug!("sound dropped: {e}");
            }
        }

        pub(super) fn set_music(&self, on: bool) {
            if on {
                self.music.play();
            } else {
                self.music.pause();
            }
        }
    }
}

#[cfg(not(feature = "audio"))]
mod backend {
    use super::SoundBank;

    pub(super) struct Backend;

    impl Backend {
        pub(super) fn open(_bank: &SoundBank) -> Option<Self> {
            tracing::info!("built without the audio feature, running silent");
            None
        }

        pub(super) fn play(&self, _samples: &[i16]) {}

        pub(super) fn set_music(&self, _on: bool) {}
    }
}
