use super::name::decode_name;
use super::{PacketCodec, HEADER_LEN};
use ferrous_dig_domain::{DomainError, Header, Message, Question, RecordData, RecordType, ResourceRecord};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Fixed part of a resource record after its owner name: type, class, ttl, rdlength.
const RR_FIXED_LEN: usize = 10;

impl PacketCodec {
    /// Decodes an untrusted response.
    ///
    /// Header problems and transaction id mismatches are errors. Once the
    /// header is accepted, a section that runs out of bytes ends decoding and
    /// the records read so far are returned. A compression loop in an owner
    /// name is always an error.
    pub fn decode_response(
        bytes: &[u8],
        expected_id: Option<u16>,
    ) -> Result<Message, DomainError> {
        if bytes.len() < HEADER_LEN {
            return Err(DomainError::TruncatedPacket {
                needed: HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let header = Header::from_flags(
            read_u16(bytes, 0)?,
            read_u16(bytes, 2)?,
            [
                read_u16(bytes, 4)?,
                read_u16(bytes, 6)?,
                read_u16(bytes, 8)?,
                read_u16(bytes, 10)?,
            ],
        );

        if let Some(expected) = expected_id {
            if header.id != expected {
                return Err(DomainError::TransactionMismatch {
                    expected,
                    actual: header.id,
                });
            }
        }

        let mut message = Message::new(header);

        match decode_sections(bytes, &mut message) {
            Ok(()) => {}
            Err(e @ DomainError::CompressionLoopDetected { .. }) => return Err(e),
            Err(e) => {
                debug!(
                    id = message.header.id,
                    questions = message.questions.len(),
                    answers = message.answers.len(),
                    authority = message.authority.len(),
                    additional = message.additional.len(),
                    error = %e,
                    "Partial DNS response decoded"
                );
            }
        }

        Ok(message)
    }

    pub fn decode_name(bytes: &[u8], offset: usize) -> Result<(String, usize), DomainError> {
        decode_name(bytes, offset)
    }
}

fn decode_sections(bytes: &[u8], message: &mut Message) -> Result<(), DomainError> {
    let mut offset = HEADER_LEN;

    for _ in 0..message.header.qdcount {
        let (question, next) = decode_question(bytes, offset)?;
        message.questions.push(question);
        offset = next;
    }

    for _ in 0..message.header.ancount {
        let (record, next) = decode_record(bytes, offset)?;
        message.answers.push(record);
        offset = next;
    }

    for _ in 0..message.header.nscount {
        let (record, next) = decode_record(bytes, offset)?;
        message.authority.push(record);
        offset = next;
    }

    for _ in 0..message.header.arcount {
        let (record, next) = decode_record(bytes, offset)?;
        message.additional.push(record);
        offset = next;
    }

    Ok(())
}

fn decode_question(bytes: &[u8], offset: usize) -> Result<(Question, usize), DomainError> {
    let (name, offset) = decode_name(bytes, offset)?;
    let qtype = read_u16(bytes, offset)?;
    let class = read_u16(bytes, offset + 2)?;

    Ok((Question { name, qtype, class }, offset + 4))
}

fn decode_record(bytes: &[u8], offset: usize) -> Result<(ResourceRecord, usize), DomainError> {
    let (name, offset) = decode_name(bytes, offset)?;

    let rtype = read_u16(bytes, offset)?;
    let class = read_u16(bytes, offset + 2)?;
    let ttl = read_u32(bytes, offset + 4)?;
    let rdlength = usize::from(read_u16(bytes, offset + 8)?);

    let rdata_start = offset + RR_FIXED_LEN;
    let rdata_end = rdata_start + rdlength;
    if rdata_end > bytes.len() {
        return Err(DomainError::TruncatedPacket {
            needed: rdata_end,
            actual: bytes.len(),
        });
    }

    let data = decode_rdata(bytes, rtype, rdata_start, rdata_end);

    Ok((
        ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            data,
        },
        rdata_end,
    ))
}

/// Interprets RDATA in `bytes[start..end]`. Never fails: whatever cannot be
/// read for the record's type is kept raw.
fn decode_rdata(bytes: &[u8], rtype: u16, start: usize, end: usize) -> RecordData {
    let rdata = &bytes[start..end];

    let parsed = match RecordType::from_u16(rtype) {
        Some(RecordType::A) => <[u8; 4]>::try_from(rdata)
            .ok()
            .map(|octets| RecordData::A(Ipv4Addr::from(octets))),
        Some(RecordType::AAAA) => <[u8; 16]>::try_from(rdata)
            .ok()
            .map(|octets| RecordData::Aaaa(Ipv6Addr::from(octets))),
        Some(RecordType::NS | RecordType::CNAME | RecordType::PTR) => {
            embedded_name(bytes, start, end).map(RecordData::Name)
        }
        Some(RecordType::MX) if rdata.len() >= 3 => {
            let preference = u16::from_be_bytes([rdata[0], rdata[1]]);
            embedded_name(bytes, start + 2, end).map(|exchange| RecordData::Mx {
                preference,
                exchange,
            })
        }
        Some(RecordType::TXT) => Some(RecordData::Txt(decode_txt(rdata))),
        _ => None,
    };

    parsed.unwrap_or_else(|| RecordData::Unparsed(rdata.to_vec()))
}

/// A name inside RDATA. Pointers may lead anywhere in the packet, but the
/// in-place part must stay within the record.
fn embedded_name(bytes: &[u8], start: usize, end: usize) -> Option<String> {
    match decode_name(bytes, start) {
        Ok((name, next)) if next <= end => Some(name),
        Ok(_) => None,
        Err(e) => {
            debug!(offset = start, error = %e, "Undecodable name in RDATA");
            None
        }
    }
}

/// Concatenates length-prefixed character strings. A segment that overruns
/// the RDATA ends the text.
fn decode_txt(rdata: &[u8]) -> String {
    let mut text = String::new();
    let mut pos = 0;

    while let Some(&len) = rdata.get(pos) {
        let start = pos + 1;
        let end = start + usize::from(len);
        let Some(segment) = rdata.get(start..end) else {
            break;
        };
        text.push_str(&String::from_utf8_lossy(segment));
        pos = end;
    }

    text
}

fn read_u16(bytes: &[u8], offset: usize) -> Result<u16, DomainError> {
    bytes
        .get(offset..offset + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or(DomainError::TruncatedPacket {
            needed: offset + 2,
            actual: bytes.len(),
        })
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, DomainError> {
    bytes
        .get(offset..offset + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(DomainError::TruncatedPacket {
            needed: offset + 4,
            actual: bytes.len(),
        })
}
