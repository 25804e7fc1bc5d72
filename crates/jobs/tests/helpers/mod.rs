pub mod mock_cache_maintenance;

pub use mock_cache_maintenance::*;
