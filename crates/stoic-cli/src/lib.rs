//! StoicAI terminal front-end: a line-oriented chat over the session controller.

use clap::Parser;
use std::path::PathBuf;

pub mod app;
pub mod command;
pub mod render;

pub use app::App;
pub use command::Command;

/// Chat with StoicAI from the terminal
#[derive(Debug, Parser)]
#[command(name = "stoic", version)]
pub struct Cli {
    /// Origin of the StoicAI proxy endpoint
    #[arg(long, env = "STOIC_API_URL", default_value = "http://127.0.0.1:3000")]
    pub api_url: String,

    /// Directory holding chat history [default: <data dir>/stoicai]
    #[arg(long, env = "STOIC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join("stoicai"))
                .ok_or_else(|| anyhow::anyhow!("No data directory found; pass --data-dir")),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        App::open(&self.api_url, self.data_dir()?)?.run().await
    }
}
