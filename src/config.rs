#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    /// Scalable font to fit the time to. The built-in font is used if unset.
    pub font: Option<camino::Utf8PathBuf>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    #[serde(default = "default_i2c_device")]
    pub i2c_device: camino::Utf8PathBuf,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_i2c_device() -> camino::Utf8PathBuf {
    camino::Utf8PathBuf::from(crate::konst::DEFAULT_I2C_DEVICE)
}

fn default_width() -> u32 {
    crate::konst::DEFAULT_WIDTH
}

fn default_height() -> u32 {
    crate::konst::DEFAULT_HEIGHT
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_device: default_i2c_device(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl DisplayConfig {
    pub fn canvas(&self) -> Result<crate::frame::Canvas, ConfigError> {
        crate::frame::Canvas::new(self.width, self.height).ok_or(ConfigError::EmptyCanvas {
            width: self.width,
            height: self.height,
        })
    }
}

impl Config {
    /// Reads the configuration file if one was given, then applies the font
    /// override from the command line or environment.
    pub async fn load(
        path: Option<&camino::Utf8Path>,
        font_override: Option<camino::Utf8PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        if let Some(font) = font_override {
            config.font = Some(font);
        }

        config.display.canvas()?;
        Ok(config)
    }

    async fn from_file(path: &camino::Utf8Path) -> Result<Self, ConfigError> {
        let config_str =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::ReadingFile {
                    path: path.to_path_buf(),
                    source,
                })?;

        toml::from_str(&config_str).map_err(ConfigError::ParsingConfig)
    }

    pub fn font_spec(&self) -> crate::font::FontSpec {
        crate::font::FontSpec::from_path(self.font.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file from path '{}'", .path)]
    ReadingFile {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ParsingConfig(#[from] toml::de::Error),

    #[error("Display size {}x{} is empty", .width, .height)]
    EmptyCanvas { width: u32, height: u32 },
}
