//! RFC 1035 wire format for the queries we send and the responses we read.

pub mod decoder;
pub mod encoder;
pub mod name;

pub const HEADER_LEN: usize = 12;
pub const CLASS_IN: u16 = 1;

/// Standard query with only RD set.
pub const QUERY_FLAGS: u16 = 0x0100;

/// Encodes queries and decodes responses.
///
/// Encoding lives in [`encoder`], decoding in [`decoder`].
pub struct PacketCodec;
