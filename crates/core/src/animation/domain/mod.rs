pub mod animated_image;
pub mod animated_image_decoder;
