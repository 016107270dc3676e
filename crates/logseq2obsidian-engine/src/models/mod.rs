pub mod page;

pub use page::{Block, Page, Property};
