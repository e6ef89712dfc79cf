pub mod compose;
pub mod labels;
pub mod layer;
pub mod legend;
pub mod pick;
pub mod symbology;

pub use compose::{ViewState, compose};
pub use layer::*;
