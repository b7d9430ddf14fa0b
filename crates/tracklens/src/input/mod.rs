//! Dataset acquisition, parsing, and the in-memory track table.

mod loader;
mod parser;
mod remote;
mod source;

pub use loader::{DatasetHandle, DatasetLoader};
pub use parser::{Parser, ParserConfig};
pub use remote::{HuggingFaceSource, RemoteSource, DEFAULT_REMOTE_ID};
pub use source::{is_null_value, Dataset, SourceMetadata, Track};
