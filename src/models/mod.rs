pub mod bookmark;
pub mod news;
pub mod sentiment;

pub use bookmark::*;
pub use news::*;
pub use sentiment::*;
