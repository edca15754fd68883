//! Building blocks shared by the viewers: frame textures, the image
//! display and the position slider.

mod display;
mod slider;
mod texture;

pub use display::ImageDisplay;
pub use slider::FrameSlider;
pub use texture::{frame_to_color_image, Levels};
