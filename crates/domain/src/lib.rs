//! ferrous-dig domain layer
pub mod config;
pub mod dns_message;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use config::{CacheConfig, CliOverrides, Config, ConfigError, LoggingConfig, ResolverConfig};
pub use dns_message::{Header, Message, QueryMetadata, Question, ResponseStatus};
pub use dns_query::DnsQuery;
pub use dns_record::{RecordData, RecordType, ResourceRecord};
pub use errors::{DomainError, ErrorKind};
