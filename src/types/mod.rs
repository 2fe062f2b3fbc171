pub mod alarm;
pub mod position;
pub mod status;

pub use alarm::*;
pub use position::*;
pub use status::*;
