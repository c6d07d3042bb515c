use archcam_foundation::CaptureError;

/// Pixel layouts a frame can carry. The capture pipeline is fixed to
/// 8-bit RGB without alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
        }
    }
}

/// One captured frame of the display. Immutable once produced; ownership
/// moves from the frame source through the capture loop to the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// `stride` is bytes per row. Geometry must account for the payload
    /// exactly: `stride * height == data.len()` and each row must hold
    /// `width` pixels.
    pub fn new(
        width: u32,
        height: u32,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, CaptureError> {
        let min_stride = width as usize * PixelFormat::Rgb8.bytes_per_pixel();
        if stride < min_stride || stride.checked_mul(height as usize) != Some(data.len()) {
            return Err(CaptureError::BufferShape {
                width,
                height,
                stride,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            format: PixelFormat::Rgb8,
            data,
        })
    }

    /// Buffer with no row padding.
    pub fn packed(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CaptureError> {
        let stride = width as usize * PixelFormat::Rgb8.bytes_per_pixel();
        Self::new(width, height, stride, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The pixel bytes of row `y`, without any trailing padding.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        let pixels = self.width as usize * self.format.bytes_per_pixel();
        &self.data[start..start + pixels]
    }
}
