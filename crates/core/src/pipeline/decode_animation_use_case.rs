use crate::animation::domain::animated_image::AnimatedImage;
use crate::animation::domain::animated_image_decoder::AnimatedImageDecoder;

/// Best-effort animation decoding: any failure becomes `None`.
pub struct DecodeAnimationUseCase {
    decoder: Box<dyn AnimatedImageDecoder>,
}

impl DecodeAnimationUseCase {
    pub fn new(decoder: Box<dyn AnimatedImageDecoder>) -> Self {
        Self { decoder }
    }

    /// Returns `None` when `bytes` are not a decodable animation; callers
    /// should fall back to static display.
    pub fn execute(&self, bytes: &[u8]) -> Option<AnimatedImage> {
        match self.decoder.decode(bytes) {
            Ok(animated) => Some(animated),
            Err(e) => {
                log::debug!("Not decodable as animation ({} bytes): {e}", bytes.len());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::domain::animated_image::{AnimationFrame, LoopCount};
    use crate::shared::color::Color;
    use crate::shared::image::Image;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct StubDecoder {
        result: Option<AnimatedImage>,
        inputs: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl AnimatedImageDecoder for StubDecoder {
        fn decode(&self, bytes: &[u8]) -> Result<AnimatedImage, Box<dyn std::error::Error>> {
            self.inputs.lock().unwrap().push(bytes.to_vec());
            self.result.clone().ok_or_else(|| "stub failure".into())
        }
    }

    fn one_frame() -> AnimatedImage {
        AnimatedImage::new(
            vec![AnimationFrame::new(
                Image::solid(2, 2, Color::WHITE),
                Duration::from_millis(100),
            )],
            LoopCount::Infinite,
        )
        .unwrap()
    }

    #[test]
    fn test_success_is_passed_through() {
        let inputs = Arc::new(Mutex::new(Vec::new()));
        let uc = DecodeAnimationUseCase::new(Box::new(StubDecoder {
            result: Some(one_frame()),
            inputs: inputs.clone(),
        }));

        assert_eq!(uc.execute(&[1, 2, 3]), Some(one_frame()));
        assert_eq!(*inputs.lock().unwrap(), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_failure_becomes_none() {
        let uc = DecodeAnimationUseCase::new(Box::new(StubDecoder {
            result: None,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }));
        assert_eq!(uc.execute(b"anything"), None);
    }
}
