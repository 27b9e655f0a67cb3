//! Firehose telemetry decoding.
//!
//! The ring streams fixed 16-byte packets once the firehose is started. Byte
//! 1 selects the sample kind (SpO2, PPG or accelerometer) and the following
//! bytes carry kind-specific fields:
//! - SpO2: 16-bit current value, then single-byte max/min/diff.
//! - PPG: four 16-bit big-endian values.
//! - Accelerometer: three 12-bit axes with an out-of-band sign bit.
//!
//! Decoding is pure and never reads past the supplied buffer. Offsets live in
//! `layout`, bounds-checked access and axis unpacking in `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::FirehoseError;
pub use parser::{AccelerometerReading, Kind, PpgReading, Reading, SpO2Reading, decode};
