use anyhow::Context;
use gc::domain::config::ApiConfig;
use gc::kernel::config::load_config;
use gc_server::{Server, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging)?;

    Server::builder().config(cfg).build().await?.run().await
}
