//! Server configuration from command-line flags or environment.

use std::path::PathBuf;

use clap::Parser;

/// WavePredictor HTTP server
#[derive(Parser, Debug, Clone)]
#[command(name = "wave-predictor-server")]
#[command(about = "Serve wave-bulk predictions and activity recommendations", long_about = None)]
pub struct ServerConfig {
    /// Path to the JSON model artifact
    #[arg(long, env = "WAVE_MODEL_PATH", default_value = "model.json")]
    pub model: PathBuf,

    /// Address to bind
    #[arg(long, env = "WAVE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "WAVE_PORT", default_value_t = 5500)]
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
