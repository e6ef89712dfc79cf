pub mod camera;
pub mod config;
pub mod debounce;
pub mod journal;
pub mod session;

pub use camera::CameraState;
pub use config::ViewerConfig;
pub use session::{ViewerEvent, ViewerSession};
