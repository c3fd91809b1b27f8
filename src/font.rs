use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Dimensions;
use embedded_graphics::prelude::Point;
use embedded_graphics::prelude::Size;
use embedded_graphics::text::Baseline;
use embedded_graphics::text::Text;
use embedded_graphics::Drawable;

use crate::frame::Frame;

/// A font at a fixed size that can measure and draw a single line of text.
pub trait TextFont {
    /// Size of the box the text occupies when drawn at the origin.
    fn measure(&self, text: &str) -> Size;

    /// Draws `text` so that its bounding box starts at `top_left`.
    fn draw(&self, text: &str, top_left: Point, frame: &mut Frame);
}

/// A font that can be instantiated at arbitrary integer sizes.
pub trait ScalableFace {
    type AtSize<'a>: TextFont
    where
        Self: 'a;

    fn at_size(&self, size: u32) -> Self::AtSize<'_>;
}

/// Where the glyphs for a frame come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontSpec {
    #[default]
    Builtin,
    Scalable(camino::Utf8PathBuf),
}

impl FontSpec {
    pub fn from_path(path: Option<camino::Utf8PathBuf>) -> Self {
        path.map(Self::Scalable).unwrap_or_default()
    }
}

impl std::fmt::Display for FontSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontSpec::Builtin => write!(f, "builtin"),
            FontSpec::Scalable(path) => write!(f, "{path}"),
        }
    }
}

/// The built-in 6x10 mono font, used verbatim at its intrinsic size.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFont;

impl BuiltinFont {
    fn style() -> MonoTextStyle<'static, BinaryColor> {
        MonoTextStyle::new(
            &embedded_graphics::mono_font::ascii::FONT_6X10,
            BinaryColor::On,
        )
    }
}

impl TextFont for BuiltinFont {
    fn measure(&self, text: &str) -> Size {
        Text::with_baseline(text, Point::zero(), Self::style(), Baseline::Top)
            .bounding_box()
            .size
    }

    fn draw(&self, text: &str, top_left: Point, frame: &mut Frame) {
        Text::with_baseline(text, top_left, Self::style(), Baseline::Top)
            .draw(frame)
            .unwrap_or_else(|never| match never {});
    }
}

/// A TrueType/OpenType face read from disk.
pub struct FontFace {
    font: fontdue::Font,
}

impl FontFace {
    pub fn open(path: &camino::Utf8Path) -> Result<Self, crate::error::RenderError> {
        let bytes =
            std::fs::read(path).map_err(|source| crate::error::RenderError::ReadingFont {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_bytes(&bytes).map_err(|reason| crate::error::RenderError::ParsingFont {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, &'static str> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())?;
        Ok(Self { font })
    }
}

impl ScalableFace for FontFace {
    type AtSize<'a> = SizedFace<'a>
    where
        Self: 'a;

    fn at_size(&self, size: u32) -> SizedFace<'_> {
        SizedFace {
            font: &self.font,
            px: size as f32,
        }
    }
}

pub struct SizedFace<'f> {
    font: &'f fontdue::Font,
    px: f32,
}

impl SizedFace<'_> {
    /// Ascent and descent in pixels, descent being negative.
    fn line_metrics(&self) -> (f32, f32) {
        self.font
            .horizontal_line_metrics(self.px)
            .map(|metrics| (metrics.ascent, metrics.descent))
            .unwrap_or((self.px, 0.0))
    }
}

impl TextFont for SizedFace<'_> {
    fn measure(&self, text: &str) -> Size {
        let advance: f32 = text
            .chars()
            .map(|c| self.font.metrics(c, self.px).advance_width)
            .sum();
        let (ascent, descent) = self.line_metrics();

        Size::new(advance.ceil() as u32, (ascent - descent).ceil() as u32)
    }

    fn draw(&self, text: &str, top_left: Point, frame: &mut Frame) {
        let baseline = top_left.y + self.line_metrics().0.ceil() as i32;
        let mut pen = top_left.x as f32;

        for c in text.chars() {
            let (metrics, coverage) = self.font.rasterize(c, self.px);
            let origin = Point::new(
                pen.round() as i32 + metrics.xmin,
                baseline - metrics.ymin - metrics.height as i32,
            );

            for (idx, value) in coverage.iter().enumerate() {
                if *value >= 128 {
                    let offset = Point::new(
                        (idx % metrics.width) as i32,
                        (idx / metrics.width) as i32,
                    );
                    frame.set_pixel(origin + offset, BinaryColor::On);
                }
            }

            pen += metrics.advance_width;
        }
    }
}

/// DejaVu Sans Mono Bold, see `testdata/LICENSE-DejaVu`.
///
/// Every glyph advances 1233/2048 em and the line is 2384/2048 em tall.
#[cfg(test)]
pub fn dejavu_mono_bold() -> &'static FontFace {
    static FACE: std::sync::OnceLock<FontFace> = std::sync::OnceLock::new();
    FACE.get_or_init(|| {
        FontFace::from_bytes(include_bytes!("testdata/DejaVuSansMono-Bold.ttf"))
            .expect("bundled font parses")
    })
}

/// Test face whose glyphs are solid blocks, `size` tall and `size / 2 + 1`
/// wide, so measurements are easy to predict.
///
/// `loads` counts `at_size` calls and is shared between clones.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct BlockFace {
    pub loads: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl BlockFace {
    pub fn glyph_width(size: u32) -> u32 {
        size / 2 + 1
    }
}

#[cfg(test)]
impl ScalableFace for BlockFace {
    type AtSize<'a> = BlockFont
    where
        Self: 'a;

    fn at_size(&self, size: u32) -> BlockFont {
        self.loads.set(self.loads.get() + 1);
        BlockFont { size }
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct BlockFont {
    pub size: u32,
}

#[cfg(test)]
impl TextFont for BlockFont {
    fn measure(&self, text: &str) -> Size {
        let glyphs = text.chars().count() as u32;
        Size::new(glyphs * BlockFace::glyph_width(self.size), self.size)
    }

    fn draw(&self, text: &str, top_left: Point, frame: &mut Frame) {
        let size = self.measure(text);
        for y in 0..size.height as i32 {
            for x in 0..size.width as i32 {
                frame.set_pixel(top_left + Point::new(x, y), BinaryColor::On);
            }
        }
    }
}
