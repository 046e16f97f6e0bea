mod concat;
mod listing;
mod markdown;
mod page;
pub mod placeholder;
mod version;

pub use concat::{ConcatOptions, ConcatResult, concat};
pub use page::{PageOptions, convert};
pub use placeholder::{Placeholders, VERSION_TOKEN};
pub use version::current_version;
