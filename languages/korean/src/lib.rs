pub mod builder;
pub mod parser;
pub mod source;
pub mod store;

pub use builder::{BuildError, HanjaDbBuilder, build_from_file};
pub use parser::{classify_line, parse_line};
pub use source::DictionarySource;
pub use store::HanjaStore;
