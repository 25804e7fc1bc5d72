use super::{hex, RecordType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Interpreted RDATA of a resource record.
///
/// Decoding never fails for a single record: anything the decoder cannot
/// interpret for the record's type is kept as [`RecordData::Unparsed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    /// Target of an NS, CNAME or PTR record.
    Name(String),
    Mx { preference: u16, exchange: String },
    /// TXT segments concatenated, without the surrounding quotes.
    Txt(String),
    Unparsed(#[serde(with = "hex")] Vec<u8>),
}

impl RecordData {
    pub fn is_unparsed(&self) -> bool {
        matches!(self, RecordData::Unparsed(_))
    }

    pub fn as_ip(&self) -> Option<std::net::IpAddr> {
        match self {
            RecordData::A(v4) => Some((*v4).into()),
            RecordData::Aaaa(v6) => Some((*v6).into()),
            _ => None,
        }
    }

    pub(crate) fn approx_size(&self) -> usize {
        match self {
            RecordData::A(_) => 4,
            RecordData::Aaaa(_) => 16,
            RecordData::Name(name) => name.len(),
            RecordData::Mx { exchange, .. } => 2 + exchange.len(),
            RecordData::Txt(text) => text.len(),
            RecordData::Unparsed(raw) => raw.len(),
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::Aaaa(addr) => write!(f, "{}", addr),
            RecordData::Name(name) => write!(f, "{}", name),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::Txt(text) => write!(f, "\"{}\"", text),
            RecordData::Unparsed(raw) => write!(f, "{}", hex::encode(raw)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.rtype)
    }

    pub fn type_name(&self) -> String {
        RecordType::name_for_code(self.rtype)
    }

    pub(crate) fn approx_size(&self) -> usize {
        std::mem::size_of::<Self>() + self.name.len() + self.data.approx_size()
    }
}
