use super::animated_image::AnimatedImage;

/// Decodes raw encoded bytes into an [`AnimatedImage`].
///
/// Errors carry a human-readable reason; callers that only care about
/// "decodable or not" should use [`crate::effects::decode_animated_image`].
pub trait AnimatedImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<AnimatedImage, Box<dyn std::error::Error>>;
}
