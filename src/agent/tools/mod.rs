pub mod tool;
pub mod search_movie;

pub use tool::*;
pub use search_movie::*;
