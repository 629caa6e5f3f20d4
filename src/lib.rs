pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::path::PathBuf;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::seed::SeedService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_seed(file: PathBuf, reset: bool) -> Result<()> {
    let service = SeedService::new(file, reset);
    service.run()
}
