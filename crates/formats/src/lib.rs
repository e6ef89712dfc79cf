pub mod columns;
pub mod dataset;
pub mod error;
pub mod export;
pub mod rows;

pub use columns::ColumnMap;
pub use dataset::{Dataset, load_dataset};
pub use error::{ExportError, LoadError};
pub use export::{export_frame, write_frame};
pub use rows::read_rows;
