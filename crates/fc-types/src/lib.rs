pub mod parameter;
pub mod target;
pub mod evaluation;
pub mod errors;

pub use parameter::*;
pub use target::*;
pub use evaluation::*;
pub use errors::*;
