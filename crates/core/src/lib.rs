pub mod animation;
pub mod blurring;
pub mod effects;
pub mod io;
pub mod pipeline;
pub mod sampling;
pub mod shared;

pub use animation::domain::animated_image::{AnimatedImage, AnimationFrame, LoopCount};
pub use blurring::domain::blur_error::BlurError;
pub use effects::{average_color, blur, decode_animated_image, light_blur};
pub use shared::color::Color;
pub use shared::image::Image;
