use serde::{Deserialize, Serialize};

use super::error::FirehoseError;
use super::layout;
use super::reader::FirehoseReader;

/// Sample kind carried in the tag byte of a firehose packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    SpO2,
    Ppg,
    Accelerometer,
}

impl Kind {
    pub fn tag(self) -> u8 {
        match self {
            Kind::SpO2 => layout::KIND_SPO2,
            Kind::Ppg => layout::KIND_PPG,
            Kind::Accelerometer => layout::KIND_ACCELEROMETER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::SpO2 => "spo2",
            Kind::Ppg => "ppg",
            Kind::Accelerometer => "accelerometer",
        }
    }

    fn min_len(self) -> usize {
        match self {
            Kind::SpO2 => layout::MIN_LEN_SPO2,
            Kind::Ppg => layout::MIN_LEN_PPG,
            Kind::Accelerometer => layout::MIN_LEN_ACCELEROMETER,
        }
    }
}

impl TryFrom<u8> for Kind {
    type Error = FirehoseError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            layout::KIND_SPO2 => Ok(Kind::SpO2),
            layout::KIND_PPG => Ok(Kind::Ppg),
            layout::KIND_ACCELEROMETER => Ok(Kind::Accelerometer),
            other => Err(FirehoseError::UnrecognizedKind { tag: other }),
        }
    }
}

/// Blood-oxygen sample. Only `current` spans two bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpO2Reading {
    pub current: u16,
    pub max: u8,
    pub min: u8,
    pub diff: u8,
}

/// Photoplethysmography sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpgReading {
    pub current: u16,
    pub max: u16,
    pub min: u16,
    pub diff: u16,
}

/// Accelerometer sample, one signed 12-bit value per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccelerometerReading {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// A decoded firehose packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reading {
    #[serde(rename = "spo2")]
    SpO2(SpO2Reading),
    Ppg(PpgReading),
    Accelerometer(AccelerometerReading),
}

impl Reading {
    pub fn kind(&self) -> Kind {
        match self {
            Reading::SpO2(_) => Kind::SpO2,
            Reading::Ppg(_) => Kind::Ppg,
            Reading::Accelerometer(_) => Kind::Accelerometer,
        }
    }
}

/// Decode one firehose packet.
///
/// Decoding is stateless: the result depends on `packet` alone. Bytes past
/// the last field of the indicated kind (including the trailer) are ignored.
///
/// # Errors
/// Returns `FirehoseError::UnrecognizedKind` when the tag byte is not a known
/// kind, and `FirehoseError::OutOfBounds` when `packet` is too short for the
/// tag or for the fields of its kind.
///
/// # Examples
/// ```
/// use colmi_firehose_core::{Reading, SpO2Reading, decode};
///
/// let packet = [
///     0xa1, 0x01, 0x1d, 0x09, 0x00, 0x07, 0x00, 0x08, 0x00, 0xfa, 0, 0, 0, 0, 0, 0xd3,
/// ];
/// let reading = decode(&packet)?;
/// assert_eq!(
///     reading,
///     Reading::SpO2(SpO2Reading { current: 7433, max: 7, min: 8, diff: 250 })
/// );
/// # Ok::<(), colmi_firehose_core::FirehoseError>(())
/// ```
pub fn decode(packet: &[u8]) -> Result<Reading, FirehoseError> {
    let reader = FirehoseReader::new(packet);
    reader.require_len(layout::MIN_LEN_KIND)?;

    let tag = reader.read_u8(layout::KIND_OFFSET)?;
    let kind = Kind::try_from(tag).inspect_err(|_| {
        log::warn!("unexpected kind of firehose packet {tag}: {packet:02x?}");
    })?;
    reader.require_len(kind.min_len())?;

    let reading = match kind {
        Kind::SpO2 => Reading::SpO2(SpO2Reading {
            current: reader.read_u16_be(layout::CURRENT_HI_OFFSET, layout::CURRENT_LO_OFFSET)?,
            max: reader.read_u8(layout::SPO2_MAX_OFFSET)?,
            min: reader.read_u8(layout::SPO2_MIN_OFFSET)?,
            diff: reader.read_u8(layout::SPO2_DIFF_OFFSET)?,
        }),
        Kind::Ppg => Reading::Ppg(PpgReading {
            current: reader.read_u16_be(layout::CURRENT_HI_OFFSET, layout::CURRENT_LO_OFFSET)?,
            max: reader.read_u16_be(layout::PPG_MAX_HI_OFFSET, layout::PPG_MAX_LO_OFFSET)?,
            min: reader.read_u16_be(layout::PPG_MIN_HI_OFFSET, layout::PPG_MIN_LO_OFFSET)?,
            diff: reader.read_u16_be(layout::PPG_DIFF_HI_OFFSET, layout::PPG_DIFF_LO_OFFSET)?,
        }),
        Kind::Accelerometer => Reading::Accelerometer(AccelerometerReading {
            x: reader.read_axis(
                layout::ACCEL_X_HI_OFFSET,
                layout::ACCEL_X_LO_OFFSET,
                layout::ACCEL_X_SIGN_OFFSET,
            )?,
            y: reader.read_axis(
                layout::ACCEL_Y_HI_OFFSET,
                layout::ACCEL_Y_LO_OFFSET,
                layout::ACCEL_Y_SIGN_OFFSET,
            )?,
            z: reader.read_axis(
                layout::ACCEL_Z_HI_OFFSET,
                layout::ACCEL_Z_LO_OFFSET,
                layout::ACCEL_Z_SIGN_OFFSET,
            )?,
        }),
    };
    Ok(reading)
}
