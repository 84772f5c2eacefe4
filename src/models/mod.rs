pub mod auth;
pub mod file_item;
pub mod filename;
pub mod fragment;
pub mod loaders;
pub mod outcome;

pub use auth::AuthContext;
pub use file_item::{FileItem, FileKind};
pub use filename::{ordering_key, parse_label, ParsedLabel};
pub use fragment::{Block, MediaType, RenderedFragment};
pub use loaders::load_input_files;
pub use outcome::{BatchReport, ItemReport, ProcessingOutcome};
