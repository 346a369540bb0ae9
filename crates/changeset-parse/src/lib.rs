mod error;
mod parse;

pub use error::{FormatError, FrontMatterError, ValidationError};
pub use parse::parse_changeset;
