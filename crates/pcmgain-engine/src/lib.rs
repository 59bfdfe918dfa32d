pub mod dsp;
pub mod ffi;
pub mod pcm;

pub use dsp::effect::Effect;
pub use dsp::gain::{apply_gain, apply_gain_copied, db_to_linear, Gain};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PcmError>;

#[derive(Error, Debug)]
pub enum PcmError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported sample format: {format:?} at {bits} bits (need 16-bit int PCM)")]
    UnsupportedFormat { format: hound::SampleFormat, bits: u16 },

    #[error("Raw PCM length {0} is not a whole number of 16-bit samples")]
    OddByteCount(usize),
}

/// How the user asked for gain. dB wins when both are set.
#[derive(Debug, Clone)]
pub struct GainConfig {
    pub gain: f32,
    pub gain_db: Option<f32>,
}

impl Default for GainConfig {
    fn default() -> Self {
        Self { gain: 1.0, gain_db: None }
    }
}

impl GainConfig {
    pub fn linear(&self) -> f32 {
        match self.gain_db {
            Some(db) => db_to_linear(db),
            None => self.gain,
        }
    }

    pub fn effect(&self) -> Gain {
        Gain::new(self.linear())
    }
}
