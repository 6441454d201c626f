pub mod combat;
pub mod economy;
pub mod registry;

pub use combat::*;
pub use economy::*;
pub use registry::*;
