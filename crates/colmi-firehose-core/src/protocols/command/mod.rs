//! Command packets sent to the ring.
//!
//! Every command is 16 bytes: the command id, up to 14 bytes of sub data and
//! a trailing checksum (byte sum modulo 256). Only the firehose start/stop
//! pair is named here; `make_packet` builds arbitrary commands.

pub mod builder;
pub mod error;
pub mod layout;

pub use builder::{make_packet, start_firehose_packet, stop_firehose_packet, verify_checksum};
pub use error::CommandError;
