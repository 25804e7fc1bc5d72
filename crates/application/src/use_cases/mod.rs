pub mod bulk_query;

pub use bulk_query::{BulkQueryOutcome, BulkQueryUseCase};
