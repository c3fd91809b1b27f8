use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Path of the configuration file
    #[clap(long, short)]
    pub config: Option<camino::Utf8PathBuf>,

    /// Scalable font file to fit the time to, instead of the built-in font
    #[clap(long, env = crate::konst::FONT_ENV_VAR)]
    pub font: Option<camino::Utf8PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Drive the SSD1306 display until interrupted
    Run {
        /// Stop on the first failed refresh instead of skipping the frame
        #[clap(long)]
        strict: bool,
    },

    /// Run the refresh loop, printing frames to stdout instead of a display
    Preview,

    /// Print a single frame for the current time and exit
    RenderOnce,

    /// Check the configuration and font, then exit
    VerifyConfig,
}
