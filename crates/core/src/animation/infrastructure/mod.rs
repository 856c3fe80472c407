pub mod gif_animation_decoder;
