use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::OriginDimensions;
use embedded_graphics::prelude::Point;
use embedded_graphics::prelude::Size;

/// Fixed pixel rectangle frames are rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
}

impl Canvas {
    /// Returns `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The area left after reserving `padding` pixels on every side, or `None`
    /// if nothing is left.
    pub fn inner(&self, padding: u32) -> Option<Size> {
        let width = self.width.checked_sub(padding.saturating_mul(2))?;
        let height = self.height.checked_sub(padding.saturating_mul(2))?;
        (width > 0 && height > 0).then(|| Size::new(width, height))
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One rendered 1-bit bitmap, rows packed MSB first.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    canvas: Canvas,
    stride: usize,
    bits: Vec<u8>,
}

impl Frame {
    /// A frame with every pixel off.
    pub fn blank(canvas: Canvas) -> Self {
        let stride = canvas.width().div_ceil(8) as usize;
        Self {
            canvas,
            stride,
            bits: vec![0; stride * canvas.height() as usize],
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn index(&self, point: Point) -> Option<(usize, u8)> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        if x >= self.canvas.width() || y >= self.canvas.height() {
            return None;
        }

        let byte = y as usize * self.stride + (x / 8) as usize;
        Some((byte, 0x80 >> (x % 8)))
    }

    pub fn pixel(&self, point: Point) -> BinaryColor {
        match self.index(point) {
            Some((byte, mask)) if self.bits[byte] & mask != 0 => BinaryColor::On,
            _ => BinaryColor::Off,
        }
    }

    /// Sets a pixel; points outside the canvas are ignored.
    pub fn set_pixel(&mut self, point: Point, color: BinaryColor) {
        let Some((byte, mask)) = self.index(point) else {
            return;
        };

        match color {
            BinaryColor::On => self.bits[byte] |= mask,
            BinaryColor::Off => self.bits[byte] &= !mask,
        }
    }

    /// All pixel positions in row-major order together with their color.
    pub fn pixels(&self) -> impl Iterator<Item = embedded_graphics::Pixel<BinaryColor>> + '_ {
        let (width, height) = (self.canvas.width() as i32, self.canvas.height() as i32);
        (0..height)
            .flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
            .map(|point| embedded_graphics::Pixel(point, self.pixel(point)))
    }

    pub fn lit_pixels(&self) -> impl Iterator<Item = Point> + '_ {
        self.pixels()
            .filter(|pixel| pixel.1 == BinaryColor::On)
            .map(|pixel| pixel.0)
    }

    /// Mirrors horizontally and flips vertically, for panels mounted upside down.
    pub fn rotated_180(&self) -> Self {
        let mut rotated = Frame::blank(self.canvas);
        let (max_x, max_y) = (
            self.canvas.width() as i32 - 1,
            self.canvas.height() as i32 - 1,
        );

        for point in self.lit_pixels() {
            rotated.set_pixel(
                Point::new(max_x - point.x, max_y - point.y),
                BinaryColor::On,
            );
        }
        rotated
    }

    pub fn oriented(self, orientation: crate::sink::Orientation) -> Self {
        match orientation {
            crate::sink::Orientation::Upright => self,
            crate::sink::Orientation::UpsideDown => self.rotated_180(),
        }
    }

    /// `#` for lit pixels, `.` for dark ones, one line per row.
    pub fn to_ascii(&self) -> String {
        let width = self.canvas.width() as usize;
        let mut out = String::with_capacity((width + 1) * self.canvas.height() as usize);

        for (idx, pixel) in self.pixels().enumerate() {
            if idx > 0 && idx % width == 0 {
                out.push('\n');
            }
            out.push(if pixel.1.is_on() { '#' } else { '.' });
        }
        out
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("canvas", &self.canvas)
            .field("lit", &self.lit_pixels().count())
            .finish()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        self.canvas.size()
    }
}

impl embedded_graphics::prelude::DrawTarget for Frame {
    type Color = BinaryColor;

    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for embedded_graphics::Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }
}
