//! Box blur filter stage
//!
//! A separable box blur with edge extension. Each pass blurs rows and writes
//! the result transposed, so running the same pass twice covers both axes
//! and restores the original orientation.

use image::{DynamicImage, ImageBuffer, Pixel, Primitive};
use num_traits::{NumCast, ToPrimitive};

/// Fixed-radius box blur applied to whole images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxBlur {
    radius: u32,
}

impl BoxBlur {
    /// Create a box blur with a square kernel of side `2 * radius + 1`
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Blur an image, keeping its dimensions and pixel format.
    ///
    /// Pixel formats without a dedicated arm are blurred in RGBA f32.
    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        let r = self.radius;
        match image {
            DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(box_blur(buf, r)),
            DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(box_blur(buf, r)),
            DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(box_blur(buf, r)),
            DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(box_blur(buf, r)),
            DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(box_blur(buf, r)),
            DynamicImage::ImageLumaA16(buf) => DynamicImage::ImageLumaA16(box_blur(buf, r)),
            DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(box_blur(buf, r)),
            DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(box_blur(buf, r)),
            DynamicImage::ImageRgb32F(buf) => DynamicImage::ImageRgb32F(box_blur(buf, r)),
            DynamicImage::ImageRgba32F(buf) => DynamicImage::ImageRgba32F(box_blur(buf, r)),
            other => DynamicImage::ImageRgba32F(box_blur(&other.to_rgba32f(), r)),
        }
    }
}

impl Default for BoxBlur {
    fn default() -> Self {
        Self::new(crate::DEFAULT_BLUR_RADIUS)
    }
}

/// Box blur a single image buffer
#[must_use]
pub fn box_blur<P: Pixel>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    radius: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let (width, height) = image.dimensions();
    if radius == 0 || width == 0 || height == 0 {
        return image.clone();
    }

    let channels = P::CHANNEL_COUNT as usize;
    let r = radius as usize;

    let transposed = blur_rows_transposed(image.as_raw(), width as usize, height as usize, r, channels);
    let samples = blur_rows_transposed(&transposed, height as usize, width as usize, r, channels);

    ImageBuffer::from_raw(width, height, samples)
        .expect("blurred sample count matches the source dimensions")
}

/// Blur every row with a sliding window and write it as a column.
fn blur_rows_transposed<S: Primitive>(
    samples: &[S],
    width: usize,
    height: usize,
    r: usize,
    channels: usize,
) -> Vec<S> {
    let mut out = vec![S::DEFAULT_MIN_VALUE; samples.len()];
    let mut sums = vec![0.0f64; channels];

    let min_value = S::DEFAULT_MIN_VALUE.to_f64().unwrap_or(0.0);
    let max_value = S::DEFAULT_MAX_VALUE.to_f64().unwrap_or(f64::MAX);
    let window = (2 * r + 1) as f64;
    let last = width - 1;
    // Integer subpixels round to nearest, float subpixels keep the exact mean
    let integral = <S as NumCast>::from(0.5f64).and_then(|half: S| half.to_f64()) != Some(0.5);

    for row in 0..height {
        let row_start = row * width * channels;
        // Out-of-range columns read the nearest edge pixel
        let sample = |x: usize, channel: usize| -> f64 {
            samples[row_start + x.min(last) * channels + channel]
                .to_f64()
                .unwrap_or(0.0)
        };

        for (channel, sum) in sums.iter_mut().enumerate() {
            *sum = (r as f64 + 1.0) * sample(0, channel)
                + (1..=r).map(|x| sample(x, channel)).sum::<f64>();
        }

        for column in 0..width {
            for (channel, sum) in sums.iter_mut().enumerate() {
                let mean = *sum / window;
                let value = (if integral { mean.round() } else { mean }).clamp(min_value, max_value);
                let destination = (column * height + row) * channels + channel;
                out[destination] = <S as NumCast>::from(value).unwrap_or(S::DEFAULT_MIN_VALUE);

                let leaving = sample(column.saturating_sub(r), channel);
                let entering = sample(column + r + 1, channel);
                *sum += entering - leaving;
            }
        }
    }

    out
}
