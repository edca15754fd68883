//! Software volume rendering.

pub mod camera;
pub mod item;
pub mod render;
pub mod view;

pub use camera::OrbitCamera;
pub use item::VolumeItem;
pub use view::VolumeView;
