//! Server configuration for the sandalqa binary.

use std::env;

use clap::Parser;

use sandalqa_core::{Error, Result};

#[derive(Parser)]
#[command(name = "sandalqa")]
#[command(about = "Retrieval-augmented QA service for sandalwood cultivation", long_about = None)]
pub struct Cli {
    /// Address to listen on (overrides SANDALQA_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides SANDALQA_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Listening address, resolved from CLI flags with environment fallback
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn load(cli: &Cli) -> Result<Self> {
        let host = match cli.host.clone() {
            Some(host) => host,
            None => env::var("SANDALQA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        };

        let port = match cli.port {
            Some(port) => port,
            None => match env::var("SANDALQA_PORT") {
                Ok(raw) => raw.parse().map_err(|_| {
                    Error::Configuration(format!("SANDALQA_PORT is not a valid port: {}", raw))
                })?,
                Err(_) => 8000,
            },
        };

        Ok(Self { host, port })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
