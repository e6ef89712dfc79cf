pub mod aggregate;
pub mod layout;
pub mod node;
pub mod node_set;
pub mod palette;
pub mod picking;
pub mod query;
pub mod selection;
pub mod visibility;

pub use aggregate::{HierarchyForest, Row, aggregate};
pub use layout::{LayoutConfig, layout, layout_with_rng};
pub use node::*;
pub use node_set::*;
