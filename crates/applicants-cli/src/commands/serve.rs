//! Serve command implementation.

use anyhow::Result;
use clap::Args;

use crate::config::ServerArgs;
use crate::server;

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub server: ServerArgs,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let config = args.server.resolve()?;
    server::run(config).await
}
