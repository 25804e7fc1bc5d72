use super::name::encode_name;
use super::{PacketCodec, CLASS_IN, HEADER_LEN, QUERY_FLAGS};
use ferrous_dig_domain::{DomainError, RecordType};
use std::net::Ipv4Addr;

const REVERSE_SUFFIX: &str = "in-addr.arpa";

impl PacketCodec {
    /// Builds a single-question recursive query.
    pub fn encode_query(
        domain: &str,
        record_type: RecordType,
        transaction_id: u16,
    ) -> Result<Vec<u8>, DomainError> {
        if !record_type.is_queryable() {
            return Err(DomainError::UnsupportedRecordType(
                record_type.as_str().to_string(),
            ));
        }

        let mut packet = Vec::with_capacity(HEADER_LEN + domain.len() + 6);
        packet.extend_from_slice(&transaction_id.to_be_bytes());
        packet.extend_from_slice(&QUERY_FLAGS.to_be_bytes());
        packet.extend_from_slice(&1u16.to_be_bytes());
        packet.extend_from_slice(&[0; 6]);

        encode_name(domain, &mut packet)?;

        packet.extend_from_slice(&record_type.to_u16().to_be_bytes());
        packet.extend_from_slice(&CLASS_IN.to_be_bytes());

        Ok(packet)
    }

    /// PTR owner name for a dotted-quad IPv4 address, e.g. `4.3.2.1.in-addr.arpa`.
    pub fn reverse_name(ipv4: &str) -> Result<String, DomainError> {
        let invalid = || DomainError::InvalidAddress(ipv4.to_string());

        let octets: Vec<u8> = ipv4
            .split('.')
            .map(|part| part.parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<_, _>>()?;

        let [a, b, c, d]: [u8; 4] = octets.try_into().map_err(|_| invalid())?;

        Ok(format!("{}.{}.{}.{}.{}", d, c, b, a, REVERSE_SUFFIX))
    }

    pub fn encode_reverse_query(ipv4: &str, transaction_id: u16) -> Result<Vec<u8>, DomainError> {
        let name = Self::reverse_name(ipv4)?;
        Self::encode_query(&name, RecordType::PTR, transaction_id)
    }

    /// Same as [`PacketCodec::reverse_name`] for an already parsed address.
    pub fn reverse_name_for(addr: Ipv4Addr) -> String {
        let [a, b, c, d] = addr.octets();
        format!("{}.{}.{}.{}.{}", d, c, b, a, REVERSE_SUFFIX)
    }
}
