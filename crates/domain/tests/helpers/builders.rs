#![allow(dead_code)]
use ferrous_dig_domain::{Header, Message, Question, RecordData, RecordType, ResourceRecord};
use std::net::Ipv4Addr;

pub struct RecordBuilder {
    name: String,
    rtype: u16,
    ttl: u32,
    data: RecordData,
}

impl RecordBuilder {
    pub fn a(name: &str, addr: [u8; 4]) -> Self {
        Self {
            name: name.to_string(),
            rtype: RecordType::A.to_u16(),
            ttl: 300,
            data: RecordData::A(Ipv4Addr::from(addr)),
        }
    }

    pub fn cname(name: &str, target: &str) -> Self {
        Self {
            name: name.to_string(),
            rtype: RecordType::CNAME.to_u16(),
            ttl: 300,
            data: RecordData::Name(target.to_string()),
        }
    }

    pub fn raw(name: &str, rtype: u16, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            rtype,
            ttl: 300,
            data: RecordData::Unparsed(bytes.to_vec()),
        }
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn build(self) -> ResourceRecord {
        ResourceRecord {
            name: self.name,
            rtype: self.rtype,
            class: 1,
            ttl: self.ttl,
            data: self.data,
        }
    }
}

pub struct MessageBuilder {
    id: u16,
    rcode: u8,
    question: Option<(String, RecordType)>,
    answers: Vec<ResourceRecord>,
    authority: Vec<ResourceRecord>,
    additional: Vec<ResourceRecord>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self {
            id: 0x1234,
            rcode: 0,
            question: None,
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.rcode = rcode;
        self
    }

    pub fn question(mut self, name: &str, record_type: RecordType) -> Self {
        self.question = Some((name.to_string(), record_type));
        self
    }

    pub fn answer(mut self, record: ResourceRecord) -> Self {
        self.answers.push(record);
        self
    }

    pub fn authority(mut self, record: ResourceRecord) -> Self {
        self.authority.push(record);
        self
    }

    pub fn additional(mut self, record: ResourceRecord) -> Self {
        self.additional.push(record);
        self
    }

    pub fn build(self) -> Message {
        let counts = [
            u16::from(self.question.is_some()),
            self.answers.len() as u16,
            self.authority.len() as u16,
            self.additional.len() as u16,
        ];
        let flags = 0x8180 | u16::from(self.rcode & 0x0F);
        let mut message = Message::new(Header::from_flags(self.id, flags, counts));
        if let Some((name, record_type)) = self.question {
            message.questions.push(Question {
                name,
                qtype: record_type.to_u16(),
                class: 1,
            });
        }
        message.answers = self.answers;
        message.authority = self.authority;
        message.additional = self.additional;
        message
    }
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
