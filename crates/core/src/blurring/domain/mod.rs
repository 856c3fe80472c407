pub mod blur_error;
pub mod image_blurrer;
pub mod tint;
