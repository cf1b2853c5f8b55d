use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;

use crate::resolver::LanguagePreferences;

/// Hindi, then auto-generated Hindi; anything else is left to the
/// unconstrained fallback.
pub const DEFAULT_LANGUAGES: &str = "hi,hi-IN";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
const CAPTIONS_DIR_NAME: &str = "subscript_captions";

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Caption languages to try, in order, before accepting any language
    #[arg(
        short,
        long,
        env = "SUBSCRIPT_LANGUAGES",
        value_delimiter = ',',
        default_value = DEFAULT_LANGUAGES
    )]
    pub languages: Vec<String>,

    /// Directory caption files are written to [default: ~/subscript_captions]
    #[arg(short, long, env = "SUBSCRIPT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "SUBSCRIPT_HOST", default_value = DEFAULT_HOST)]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "SUBSCRIPT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub languages: LanguagePreferences,
    pub output_dir: PathBuf,
}

impl CommonArgs {
    /// Language order alone; needs no filesystem lookups.
    pub fn language_preferences(&self) -> LanguagePreferences {
        LanguagePreferences::new(&self.languages)
    }
}

impl Settings {
    pub fn from_args(args: &CommonArgs) -> Result<Self> {
        let output_dir = match &args.output_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow!("cannot locate home directory; pass --output-dir"))?
                .join(CAPTIONS_DIR_NAME),
        };

        Ok(Settings {
            languages: args.language_preferences(),
            output_dir,
        })
    }
}

impl ServeArgs {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
