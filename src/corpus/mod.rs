pub mod error;
pub mod loader;
pub mod record;

pub use error::CorpusError;
pub use record::{WordLine, WordRecord};
