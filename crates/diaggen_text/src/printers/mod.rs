//! Read-only visitors that re-serialize a piece tree.
//!
//! - [`definition`]: the canonical runtime string embedded in the generated definition table.
//! - [`documentation`]: the boxed table layout used in the generated reference documentation.
//! - [`enums`]: the enumerations named by `%enum_select`.

pub mod definition;
pub mod documentation;
pub mod enums;

pub use definition::DefinitionPrinter;
pub use documentation::DocumentationPrinter;
pub use enums::{EnumDecl, EnumExtractor, Enumerator};
