use compact_str::{format_compact, CompactString};
use ferrous_dig_domain::RecordType;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// `"<domain>:<TYPE>:<server>"`. The port is not part of the key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(CompactString);

impl CacheKey {
    #[inline]
    pub fn new(domain: &str, record_type: RecordType, server: &str) -> Self {
        Self(format_compact!("{}:{}:{}", domain, record_type.as_str(), server))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        Self(CompactString::from(key))
    }
}

impl Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
