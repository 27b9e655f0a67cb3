use super::error::CommandError;
use super::layout;
use crate::protocols::common::checksum::checksum;

/// Build a 16-byte command packet: command byte, zero-padded sub data, then
/// the checksum of the first 15 bytes.
///
/// # Errors
/// Returns `CommandError::SubDataTooLong` when `sub_data` exceeds 14 bytes.
///
/// # Examples
/// ```
/// use colmi_firehose_core::protocols::command::make_packet;
///
/// let packet = make_packet(0xa1, &[4])?;
/// assert_eq!(packet[0], 0xa1);
/// assert_eq!(packet[1], 4);
/// assert_eq!(packet[15], 0xa5);
/// # Ok::<(), colmi_firehose_core::protocols::command::CommandError>(())
/// ```
pub fn make_packet(
    command: u8,
    sub_data: &[u8],
) -> Result<[u8; layout::PACKET_LEN], CommandError> {
    if sub_data.len() > layout::SUB_DATA_MAX_LEN {
        return Err(CommandError::SubDataTooLong {
            len: sub_data.len(),
            max: layout::SUB_DATA_MAX_LEN,
        });
    }
    let mut packet = [0u8; layout::PACKET_LEN];
    packet[layout::COMMAND_OFFSET] = command;
    let start = layout::SUB_DATA_RANGE.start;
    packet[start..start + sub_data.len()].copy_from_slice(sub_data);
    packet[layout::CHECKSUM_OFFSET] = checksum(&packet[..layout::CHECKSUM_OFFSET]);
    Ok(packet)
}

fn firehose_packet(mode: u8) -> [u8; layout::PACKET_LEN] {
    let mut packet = [0u8; layout::PACKET_LEN];
    packet[layout::COMMAND_OFFSET] = layout::CMD_FIREHOSE;
    packet[layout::SUB_DATA_RANGE.start] = mode;
    packet[layout::CHECKSUM_OFFSET] = checksum(&packet[..layout::CHECKSUM_OFFSET]);
    packet
}

/// Packet that asks the ring to start streaming firehose telemetry.
pub fn start_firehose_packet() -> [u8; layout::PACKET_LEN] {
    firehose_packet(layout::FIREHOSE_MODE_START)
}

/// Packet that stops the firehose stream.
pub fn stop_firehose_packet() -> [u8; layout::PACKET_LEN] {
    firehose_packet(layout::FIREHOSE_MODE_STOP)
}

/// Check the trailer of a full-length packet against its checksum.
///
/// Anything other than exactly 16 bytes fails verification.
pub fn verify_checksum(packet: &[u8]) -> bool {
    if packet.len() != layout::PACKET_LEN {
        return false;
    }
    packet[layout::CHECKSUM_OFFSET] == checksum(&packet[..layout::CHECKSUM_OFFSET])
}

#[cfg(test)]
mod tests {
    use super::{make_packet, start_firehose_packet, stop_firehose_packet, verify_checksum};
    use crate::protocols::command::error::CommandError;
    use crate::protocols::command::layout;

    #[test]
    fn start_and_stop_packets() {
        let start = start_firehose_packet();
        assert_eq!(&start[..2], &[0xa1, 0x04]);
        assert!(start[2..15].iter().all(|b| *b == 0));
        assert_eq!(start[15], 0xa5);

        let stop = stop_firehose_packet();
        assert_eq!(&stop[..2], &[0xa1, 0x02]);
        assert_eq!(stop[15], 0xa3);
    }

    #[test]
    fn make_packet_matches_firehose_helpers() {
        assert_eq!(
            make_packet(layout::CMD_FIREHOSE, &[layout::FIREHOSE_MODE_START]).unwrap(),
            start_firehose_packet()
        );
    }

    #[test]
    fn make_packet_accepts_full_sub_data() {
        let sub_data = [0x01u8; layout::SUB_DATA_MAX_LEN];
        let packet = make_packet(0x10, &sub_data).unwrap();
        assert_eq!(packet[14], 0x01);
        assert_eq!(packet[15], 0x1e);
    }

    #[test]
    fn make_packet_rejects_long_sub_data() {
        let sub_data = [0u8; layout::SUB_DATA_MAX_LEN + 1];
        assert_eq!(
            make_packet(0x10, &sub_data),
            Err(CommandError::SubDataTooLong { len: 15, max: 14 })
        );
    }

    #[test]
    fn verify_checksum_checks_trailer() {
        let mut packet = start_firehose_packet();
        assert!(verify_checksum(&packet));
        packet[15] ^= 0xff;
        assert!(!verify_checksum(&packet));
        assert!(!verify_checksum(&packet[..10]));
    }
}
