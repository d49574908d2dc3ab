//! Prompt library: categories, tags, versioned prompts and templates.
//!
//! The operations in [`catalog`] and [`prompts`] are plain functions over
//! a [`LibraryBundle`]. [`LibraryStore`] and [`TemplateStore`] wrap them
//! with persistence.

pub mod catalog;
pub mod prompts;
pub mod search;
pub mod stamps;
pub mod store;
pub mod templates;
pub mod types;


pub use prompts::{MAX_VERSIONS, diff_versions, normalize};
pub use search::{SearchQuery, search};
pub use stamps::{SequentialStamps, Stamp, StampSource, SystemStamps};
pub use store::LibraryStore;
pub use templates::{NewTemplate, PromptTemplate, TemplateStore, TemplateUpdate};
pub use types::{
    Category, LibraryBundle, NewPrompt, PromptLibraryItem, PromptUpdate, Tag, Version,
};
