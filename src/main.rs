use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use crate::config::Config;

pub mod config;
pub mod controller;
pub mod helpers;
pub mod models;
pub mod repositories;
pub mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    info!("Starting market research dashboard API in {} mode", config.environment);

    controller::serve(&config).await
}
