use ferrous_dig_domain::DomainError;

pub const MAX_LABEL_LEN: usize = 63;

/// Longest encoded name before the zero terminator, length bytes included.
pub const MAX_NAME_LEN: usize = 253;

const POINTER_MASK: u8 = 0xC0;

/// Appends `domain` to `out` as length-prefixed labels ending in a zero byte.
///
/// Empty labels are dropped, so a trailing dot is accepted and `"."` is the root.
pub fn encode_name(domain: &str, out: &mut Vec<u8>) -> Result<(), DomainError> {
    if domain.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain name is empty".to_string(),
        ));
    }

    if !domain.is_ascii() {
        return Err(DomainError::InvalidDomainName(format!(
            "{} contains non-ASCII characters",
            domain
        )));
    }

    let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();

    let encoded_len = labels.iter().map(|l| l.len() + 1).sum::<usize>();
    if encoded_len > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "name encodes to {} bytes, max {}",
            encoded_len, MAX_NAME_LEN
        )));
    }

    for label in labels {
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::LabelTooLong {
                label: label.to_string(),
                length: label.len(),
            });
        }
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);

    Ok(())
}

/// Reads a possibly compressed name starting at `offset`.
///
/// Returns the dot-joined name (`"."` for the root) and the offset just past
/// the name as it appears at `offset`. After a pointer, that is the byte after
/// the first pointer, wherever the pointer chain leads.
pub fn decode_name(bytes: &[u8], offset: usize) -> Result<(String, usize), DomainError> {
    let mut labels: Vec<String> = Vec::new();
    let mut pos = offset;
    let mut resume_at: Option<usize> = None;
    let mut hops = 0usize;

    loop {
        let Some(&len_byte) = bytes.get(pos) else {
            return Err(DomainError::TruncatedPacket {
                needed: pos + 1,
                actual: bytes.len(),
            });
        };

        if len_byte == 0 {
            pos += 1;
            break;
        }

        if len_byte & POINTER_MASK == POINTER_MASK {
            let Some(&low) = bytes.get(pos + 1) else {
                return Err(DomainError::TruncatedPacket {
                    needed: pos + 2,
                    actual: bytes.len(),
                });
            };

            if resume_at.is_none() {
                resume_at = Some(pos + 2);
            }

            // Any chain longer than the packet must revisit a byte.
            hops += 1;
            if hops > bytes.len() {
                return Err(DomainError::CompressionLoopDetected { offset });
            }

            pos = (usize::from(len_byte & !POINTER_MASK) << 8) | usize::from(low);
            continue;
        }

        let len = usize::from(len_byte);
        let start = pos + 1;
        let end = start + len;
        let Some(label) = bytes.get(start..end) else {
            return Err(DomainError::TruncatedPacket {
                needed: end,
                actual: bytes.len(),
            });
        };

        labels.push(String::from_utf8_lossy(label).into_owned());
        pos = end;
    }

    let name = if labels.is_empty() {
        ".".to_string()
    } else {
        labels.join(".")
    };

    Ok((name, resume_at.unwrap_or(pos)))
}
