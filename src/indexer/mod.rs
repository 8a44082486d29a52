pub mod extractor;
pub mod parser;
pub mod walker;

pub use extractor::{FactExtractor, FileFacts};
pub use parser::{ParsedFile, Parser};
pub use walker::{DirectoryListing, DirectoryWalker};
