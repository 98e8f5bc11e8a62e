pub mod loader;
pub mod schema;

pub use loader::{CliOverrides, ConfigLoader};
pub use schema::LoadTestOptions;
