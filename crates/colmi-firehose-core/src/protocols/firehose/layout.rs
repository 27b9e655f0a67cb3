//! Byte layout of a firehose notification.
//!
//! Offsets are absolute indices into the 16-byte packet. Byte 0 carries the
//! firehose command marker and byte 15 the trailer; neither is decoded.

pub const PACKET_LEN: usize = 16;

pub const MARKER_OFFSET: usize = 0;
pub const KIND_OFFSET: usize = 1;
pub const TRAILER_OFFSET: usize = PACKET_LEN - 1;

pub const KIND_SPO2: u8 = 1;
pub const KIND_PPG: u8 = 2;
pub const KIND_ACCELEROMETER: u8 = 3;

pub const CURRENT_HI_OFFSET: usize = 2;
pub const CURRENT_LO_OFFSET: usize = 3;

// SpO2 keeps only the low byte of each statistic.
pub const SPO2_MAX_OFFSET: usize = 5;
pub const SPO2_MIN_OFFSET: usize = 7;
pub const SPO2_DIFF_OFFSET: usize = 9;

pub const PPG_MAX_HI_OFFSET: usize = 4;
pub const PPG_MAX_LO_OFFSET: usize = 5;
pub const PPG_MIN_HI_OFFSET: usize = 6;
pub const PPG_MIN_LO_OFFSET: usize = 7;
pub const PPG_DIFF_HI_OFFSET: usize = 8;
pub const PPG_DIFF_LO_OFFSET: usize = 9;

pub const ACCEL_X_HI_OFFSET: usize = 6;
pub const ACCEL_X_LO_OFFSET: usize = 7;
pub const ACCEL_X_SIGN_OFFSET: usize = 6;

// y takes both nibbles from byte 3 but its sign from byte 2.
pub const ACCEL_Y_HI_OFFSET: usize = 3;
pub const ACCEL_Y_LO_OFFSET: usize = 3;
pub const ACCEL_Y_SIGN_OFFSET: usize = 2;

pub const ACCEL_Z_HI_OFFSET: usize = 4;
pub const ACCEL_Z_LO_OFFSET: usize = 5;
pub const ACCEL_Z_SIGN_OFFSET: usize = 4;

pub const AXIS_SIGN_MASK: u8 = 0x08;
pub const AXIS_LO_NIBBLE_MASK: u8 = 0x0f;
pub const AXIS_BIAS: i16 = 1 << 12;

pub const MIN_LEN_KIND: usize = KIND_OFFSET + 1;
pub const MIN_LEN_SPO2: usize = SPO2_DIFF_OFFSET + 1;
pub const MIN_LEN_PPG: usize = PPG_DIFF_LO_OFFSET + 1;
pub const MIN_LEN_ACCELEROMETER: usize = ACCEL_X_LO_OFFSET + 1;
