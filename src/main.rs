/*
 * Responsibility
 * - tokio runtime entry
 * - call app::run() (no logic here)
 */
use anyhow::Result;

mod app;
mod config;
mod error;
mod middleware;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
