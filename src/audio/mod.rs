//! Audio framing and signal conditioning
//!
//! Everything between "bytes some synthesis service returned" and
//! "bytes the speaker driver accepts" lives here: WAV container
//! framing and parsing, stereo/mono conversion, linear resampling,
//! gain, and the two pipelines that compose them. All stages operate
//! on fully buffered data; nothing here streams or blocks.

pub mod gain;
pub mod mixer;
pub mod pipeline;
pub mod resample;
pub mod wav;

pub use pipeline::{DeviceProfile, process_raw, process_wav};
pub use wav::{WavDescriptor, frame_pcm};
