#![allow(dead_code)]

/// Length-prefixed labels plus the terminating zero.
pub fn wire_name(domain: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Pointer to an absolute offset.
pub fn pointer(offset: u16) -> Vec<u8> {
    (0xC000 | offset).to_be_bytes().to_vec()
}

/// Hand-assembled response packet. Counts are written as given, so a test can
/// claim more records than it appends.
pub struct ResponsePacket {
    bytes: Vec<u8>,
}

impl ResponsePacket {
    pub fn new(id: u16, flags: u16, counts: [u16; 4]) -> Self {
        let mut bytes = Vec::with_capacity(512);
        bytes.extend_from_slice(&id.to_be_bytes());
        bytes.extend_from_slice(&flags.to_be_bytes());
        for count in counts {
            bytes.extend_from_slice(&count.to_be_bytes());
        }
        Self { bytes }
    }

    pub fn offset(&self) -> usize {
        self.bytes.len()
    }

    pub fn question(mut self, name: &[u8], qtype: u16) -> Self {
        self.bytes.extend_from_slice(name);
        self.bytes.extend_from_slice(&qtype.to_be_bytes());
        self.bytes.extend_from_slice(&1u16.to_be_bytes());
        self
    }

    pub fn record(mut self, name: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.bytes.extend_from_slice(name);
        self.bytes.extend_from_slice(&rtype.to_be_bytes());
        self.bytes.extend_from_slice(&1u16.to_be_bytes());
        self.bytes.extend_from_slice(&ttl.to_be_bytes());
        self.bytes.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.bytes.extend_from_slice(rdata);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Answer for a query packet: same id and question, one A record per address.
pub fn answer_query(query: &[u8], rcode: u8, ttl: u32, addrs: &[[u8; 4]]) -> Vec<u8> {
    let id = u16::from_be_bytes([query[0], query[1]]);
    let flags = 0x8180 | u16::from(rcode & 0x0F);
    let mut packet =
        ResponsePacket::new(id, flags, [1, addrs.len() as u16, 0, 0]).raw(&query[12..]);
    for addr in addrs {
        packet = packet.record(&pointer(12), 1, ttl, addr);
    }
    packet.build()
}
