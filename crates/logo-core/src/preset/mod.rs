//! Preset lookup tables
//!
//! All resolvers are pure and total over their enums.

mod background;
mod brand;
mod compose;
mod material;
mod style;

pub use background::*;
pub use brand::*;
pub use compose::*;
pub use material::*;
pub use style::*;
