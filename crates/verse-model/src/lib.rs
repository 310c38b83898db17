pub mod query;
pub mod verse;
pub mod outcome;
pub mod animation;
pub mod display;

pub use query::*;
pub use verse::*;
pub use outcome::*;
pub use animation::*;
pub use display::*;
