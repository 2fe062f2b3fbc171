pub mod delta;
pub mod main;
pub mod report;
pub mod stream;

pub use delta::*;
pub use main::*;
pub use stream::*;
