//! Command line configuration of the demo binary.

use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;

pub const DEFAULT_WIDTH: u32 = 1080;
pub const DEFAULT_HEIGHT: u32 = 720;
pub const DEFAULT_ASSETS_DIR: &str = "./assets";

/// Lighting demo: textured primitives lit by point, directional and spot
/// lights. Right click switches between mouse look and the debug windows.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "lit-ngin", version)]
pub struct DemoConfig {
    /// Initial window width in pixels.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Directory relative texture paths are resolved against.
    #[arg(long, default_value = DEFAULT_ASSETS_DIR)]
    pub assets: PathBuf,

    /// Exit after rendering N frames.
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Textures to load, in texture unit order.
    pub textures: Vec<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            assets: PathBuf::from(DEFAULT_ASSETS_DIR),
            max_frames: None,
            textures: Vec::new(),
        }
    }
}

impl DemoConfig {
    /// Parse `args`, the first item being the program name.
    pub fn from_args<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Self::try_parse_from(args).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Texture paths with relative entries joined onto the assets directory.
    pub fn texture_paths(&self) -> Vec<PathBuf> {
        self.textures
            .iter()
            .map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    self.assets.join(path)
                }
            })
            .collect()
    }
}
