pub mod oled;
pub mod terminal;

/// How the panel is mounted relative to the frame's natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Upright,
    /// Needs mirroring and a vertical flip before display.
    UpsideDown,
}

/// Receives finished frames and puts them on a display.
pub trait DisplaySink: Send + 'static {
    /// Dimensions frames must be rendered at.
    fn canvas(&self) -> crate::frame::Canvas;

    fn orientation(&self) -> Orientation {
        Orientation::Upright
    }

    fn push(&mut self, frame: &crate::frame::Frame) -> Result<(), crate::error::SinkError>;
}

pub(crate) fn ensure_size(
    frame: &crate::frame::Frame,
    display: crate::frame::Canvas,
) -> Result<(), crate::error::SinkError> {
    if frame.canvas() == display {
        Ok(())
    } else {
        Err(crate::error::SinkError::SizeMismatch {
            frame: frame.canvas(),
            display,
        })
    }
}
