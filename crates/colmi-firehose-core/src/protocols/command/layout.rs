pub const PACKET_LEN: usize = 16;

pub const COMMAND_OFFSET: usize = 0;
pub const SUB_DATA_RANGE: std::ops::Range<usize> = 1..PACKET_LEN - 1;
pub const SUB_DATA_MAX_LEN: usize = PACKET_LEN - 2;
pub const CHECKSUM_OFFSET: usize = PACKET_LEN - 1;

pub const CMD_FIREHOSE: u8 = 0xa1;
pub const FIREHOSE_MODE_START: u8 = 0x04;
pub const FIREHOSE_MODE_STOP: u8 = 0x02;
