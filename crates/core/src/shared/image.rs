/// How an image is sampled when it is the source of a blit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest-neighbour sampling.
    #[default]
    Point,
    Bilinear,
}

/// A 2D pixel buffer: contiguous `u8` samples in row-major order.
///
/// Channel layout is opaque to the blur pipeline; only the count matters.
#[derive(Clone, Debug)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    filter: FilterMode,
}

impl Image {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            filter: FilterMode::Point,
        }
    }

    /// Zero-filled image of the given size.
    pub fn blank(width: u32, height: u32, channels: u8) -> Self {
        let len = (width as usize) * (height as usize) * (channels as usize);
        Self::new(vec![0; len], width, height, channels)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 16]; // 2x2x4
        let image = Image::new(data.clone(), 2, 2, 4);
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!(image.channels(), 4);
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.pixel_count(), 4);
        assert_eq!(image.data(), &data[..]);
    }

    #[test]
    fn test_new_image_uses_point_filter() {
        let image = Image::blank(4, 4, 3);
        assert_eq!(image.filter(), FilterMode::Point);
    }

    #[test]
    fn test_set_filter() {
        let mut image = Image::blank(4, 4, 3);
        image.set_filter(FilterMode::Bilinear);
        assert_eq!(image.filter(), FilterMode::Bilinear);
    }

    #[test]
    fn test_blank_is_zeroed() {
        let image = Image::blank(3, 2, 3);
        assert_eq!(image.data().len(), 18);
        assert!(image.data().iter().all(|&v| v == 0));
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Image::new(data, 2, 2, 3);
    }
}
