pub mod blur_image_use_case;
pub mod decode_animation_use_case;
