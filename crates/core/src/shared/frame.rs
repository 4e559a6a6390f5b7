use ndarray::ArrayView3;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    #[error("cannot resample a {0}-channel frame")]
    UnsupportedChannels(u8),
    #[error("frame data holds {actual} bytes, {width}x{height}x{channels} needs {expected}")]
    DataLength {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },
}

/// A single captured frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at capture and display boundaries only; the
/// detection loop treats pixel data as opaque.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
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
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
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

    /// Sequence number assigned by the frame source.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Resample to exactly `width` × `height`, ignoring aspect ratio.
    ///
    /// Returns the frame unchanged when it already has the target size.
    pub fn resized(self, width: u32, height: u32) -> Result<Frame, FrameError> {
        if self.width == width && self.height == height {
            return Ok(self);
        }
        let (src_width, src_height, channels, index) =
            (self.width, self.height, self.channels, self.index);
        let actual = self.data.len();
        let data = match channels {
            3 => image::RgbImage::from_raw(src_width, src_height, self.data)
                .map(|img| resample(&img, width, height)),
            4 => image::RgbaImage::from_raw(src_width, src_height, self.data)
                .map(|img| resample(&img, width, height)),
            1 => image::GrayImage::from_raw(src_width, src_height, self.data)
                .map(|img| resample(&img, width, height)),
            other => return Err(FrameError::UnsupportedChannels(other)),
        }
        .ok_or(FrameError::DataLength {
            width: src_width,
            height: src_height,
            channels,
            expected: src_width as usize * src_height as usize * channels as usize,
            actual,
        })?;
        Ok(Frame::new(data, width, height, channels, index))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

fn resample<P>(img: &image::ImageBuffer<P, Vec<u8>>, width: u32, height: u32) -> Vec<u8>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    image::imageops::resize(img, width, height, image::imageops::FilterType::Triangle).into_raw()
}
