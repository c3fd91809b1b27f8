#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Setting up error reporting failed")]
    InstallingColorEyre(#[source] color_eyre::Report),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("Failed to render frame")]
    Render(#[from] RenderError),

    #[error("Display sink failed")]
    Sink(#[from] SinkError),

    #[error("Error getting local time")]
    TimeOffset(#[source] time::error::IndeterminateOffset),

    #[error("Error formatting time")]
    TimeFormatting(#[source] time::error::Format),

    #[error("Failed to install signal handler")]
    Signal(#[source] std::io::Error),

    #[error("Refresh task did not finish cleanly")]
    Join(#[source] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to read font file '{}'", .path)]
    ReadingFont {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Font file '{}' is not a usable font: {}", .path, .reason)]
    ParsingFont {
        path: camino::Utf8PathBuf,
        reason: &'static str,
    },

    #[error(transparent)]
    Fit(#[from] FitError),
}

#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error("Canvas {} leaves no room inside a padding of {}px", .canvas, .padding)]
    CanvasTooSmall {
        canvas: crate::frame::Canvas,
        padding: u32,
    },

    #[error("'{}' does not fit on canvas {} at any font size", .text, .canvas)]
    TextTooLarge {
        text: String,
        canvas: crate::frame::Canvas,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to open I2C bus '{}': {}", .path, .reason)]
    OpeningBus {
        path: camino::Utf8PathBuf,
        reason: String,
    },

    #[error("Display does not support a {}x{} panel", .width, .height)]
    UnsupportedSize { width: u32, height: u32 },

    #[error("Display transport error: {:?}", .0)]
    Transport(display_interface::DisplayError),

    #[error("Frame is {}, display expects {}", .frame, .display)]
    SizeMismatch {
        frame: crate::frame::Canvas,
        display: crate::frame::Canvas,
    },

    #[error("Failed to write frame")]
    Io(#[from] std::io::Error),
}
