use crate::ImageBounds;

/// Borrowed 8-bit grayscale image, row-major, `data.len() == width * height`.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

impl GrayImageView<'_> {
    pub fn bounds(&self) -> ImageBounds {
        ImageBounds::new(self.width as f64, self.height as f64)
    }
}
