use super::{RecordType, ResourceRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response code mapped from the 4-bit RCODE header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseStatus {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Unknown(u8),
}

impl ResponseStatus {
    pub fn from_rcode(rcode: u8) -> Self {
        match rcode {
            0 => ResponseStatus::NoError,
            1 => ResponseStatus::FormErr,
            2 => ResponseStatus::ServFail,
            3 => ResponseStatus::NxDomain,
            4 => ResponseStatus::NotImp,
            5 => ResponseStatus::Refused,
            other => ResponseStatus::Unknown(other),
        }
    }

    pub fn rcode(&self) -> u8 {
        match self {
            ResponseStatus::NoError => 0,
            ResponseStatus::FormErr => 1,
            ResponseStatus::ServFail => 2,
            ResponseStatus::NxDomain => 3,
            ResponseStatus::NotImp => 4,
            ResponseStatus::Refused => 5,
            ResponseStatus::Unknown(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseStatus::NoError)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::NoError => write!(f, "NOERROR"),
            ResponseStatus::FormErr => write!(f, "FORMERR"),
            ResponseStatus::ServFail => write!(f, "SERVFAIL"),
            ResponseStatus::NxDomain => write!(f, "NXDOMAIN"),
            ResponseStatus::NotImp => write!(f, "NOTIMP"),
            ResponseStatus::Refused => write!(f, "REFUSED"),
            ResponseStatus::Unknown(code) => write!(f, "UNKNOWN({})", code),
        }
    }
}

/// DNS message header with the flags word split into its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Splits a raw flags word. The three Z bits are dropped.
    pub fn from_flags(id: u16, flags: u16, counts: [u16; 4]) -> Self {
        Self {
            id,
            qr: (flags >> 15) & 1 == 1,
            opcode: ((flags >> 11) & 0x0F) as u8,
            aa: (flags >> 10) & 1 == 1,
            tc: (flags >> 9) & 1 == 1,
            rd: (flags >> 8) & 1 == 1,
            ra: (flags >> 7) & 1 == 1,
            rcode: (flags & 0x0F) as u8,
            qdcount: counts[0],
            ancount: counts[1],
            nscount: counts[2],
            arcount: counts[3],
        }
    }

    pub fn flags(&self) -> u16 {
        (u16::from(self.qr) << 15)
            | (u16::from(self.opcode & 0x0F) << 11)
            | (u16::from(self.aa) << 10)
            | (u16::from(self.tc) << 9)
            | (u16::from(self.rd) << 8)
            | (u16::from(self.ra) << 7)
            | u16::from(self.rcode & 0x0F)
    }

    pub fn status(&self) -> ResponseStatus {
        ResponseStatus::from_rcode(self.rcode)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub name: String,
    #[serde(rename = "type")]
    pub qtype: u16,
    pub class: u16,
}

impl Question {
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.qtype)
    }

    pub fn type_name(&self) -> String {
        RecordType::name_for_code(self.qtype)
    }
}

/// What the caller asked for, attached by the resolver after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMetadata {
    pub name: String,
    pub record_type: RecordType,
    pub server: String,
}

/// A decoded DNS response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub header: Header,
    pub status: ResponseStatus,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryMetadata>,
}

impl Message {
    pub fn new(header: Header) -> Self {
        Self {
            status: header.status(),
            header,
            questions: Vec::new(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
            query: None,
        }
    }

    pub fn with_query(mut self, query: QueryMetadata) -> Self {
        self.query = Some(query);
        self
    }

    /// Answer, authority and additional records in that order.
    pub fn records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authority.iter())
            .chain(self.additional.iter())
    }

    /// Smallest TTL across all record sections, `None` when there are no records.
    pub fn min_ttl(&self) -> Option<u32> {
        self.records().map(|record| record.ttl).min()
    }

    /// Rough heap footprint, used for cache statistics.
    pub fn approx_size(&self) -> usize {
        let questions: usize = self
            .questions
            .iter()
            .map(|q| std::mem::size_of::<Question>() + q.name.len())
            .sum();
        let records: usize = self.records().map(ResourceRecord::approx_size).sum();
        let query = self
            .query
            .as_ref()
            .map(|q| q.name.len() + q.server.len())
            .unwrap_or(0);

        std::mem::size_of::<Self>() + questions + records + query
    }
}
