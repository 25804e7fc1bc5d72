pub mod dns_server_mock;
pub mod packets;

pub use dns_server_mock::*;
pub use packets::*;
