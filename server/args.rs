use std::path::PathBuf;

use clap::Parser;

use glyph_recognizer::Profile;

/// Glyph recognition upload server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Model JSON file, loaded once at startup
    #[arg(long, value_name = "FILE", env = "GLYPH_MODEL")]
    pub model: PathBuf,

    /// Listen address
    #[arg(long, default_value = "127.0.0.1:5000", value_name = "HOST:PORT", env = "GLYPH_ADDR")]
    pub addr: String,

    /// Port override for the listen address
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Normalization config JSON; overrides --profile
    #[arg(long, value_name = "FILE", env = "GLYPH_NORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Built-in normalization profile
    #[arg(long, value_enum, default_value = "upload")]
    pub profile: Profile,

    /// Largest accepted request body, in bytes
    #[arg(long, default_value = "8388608", value_name = "BYTES")]
    pub max_upload_bytes: usize,
}

impl Args {
    /// `--addr` with its port replaced by `--port`, if given.
    pub fn listen_addr(&self) -> String {
        match self.port {
            Some(port) => {
                let host = self.addr.rsplit_once(':').map_or(self.addr.as_str(), |(h, _)| h);
                format!("{}:{}", host, port)
            }
            None => self.addr.clone(),
        }
    }
}
