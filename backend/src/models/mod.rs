pub mod macros;
pub mod post;
pub mod time;

pub use post::*;
pub use time::*;
