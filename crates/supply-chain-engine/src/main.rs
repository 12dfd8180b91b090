use anyhow::Context;
use std::env;
use std::path::PathBuf;
use supply_chain_core::config::EngineConfig;
use supply_chain_core::ingest::DataSource;
use supply_chain_core::mcp::McpServer;
use supply_chain_core::mcp_stdio::run_mcp_stdio;
use supply_chain_core::render;
use supply_chain_core::server::SupplyChainEngine;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: supply-chain [--data <csv>] (--mcp | nodes | path <source> <destination> | mst | dot-path <source> <destination> | dot-mst)";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut config = EngineConfig::from_env()?;

    if let Some(pos) = args.iter().position(|a| a == "--data") {
        let path = args
            .get(pos + 1)
            .cloned()
            .with_context(|| format!("--data needs a path\n{}", USAGE))?;
        config.data_path = Some(PathBuf::from(path));
        args.drain(pos..=pos + 1);
    }

    let mut engine = SupplyChainEngine::new(config.clone());
    if let Some(path) = &config.data_path {
        engine
            .load(&DataSource::File(path.clone()))
            .with_context(|| format!("Failed to load edge table: {}", path.display()))?;
    }

    let command: Vec<&str> = args.iter().map(String::as_str).collect();
    match command.as_slice() {
        ["--mcp"] => {
            tracing::info!("starting supply chain tool server on stdio");
            run_mcp_stdio(McpServer::new(engine)).await?;
        }
        ["nodes"] => {
            println!("Sources: {}", engine.list_sources()?.join(", "));
            println!("Destinations: {}", engine.list_destinations()?.join(", "));
        }
        ["path", source, destination] => {
            let result = engine.shortest_path(source, destination)?;
            println!("{}", render::path_summary(&result));
        }
        ["mst"] => {
            println!("{}", render::spanning_summary(&engine.minimum_spanning_tree()?));
        }
        ["dot-path", source, destination] => {
            let result = engine.shortest_path(source, destination)?;
            print!("{}", render::path_dot(engine.graph()?, &result));
        }
        ["dot-mst"] => {
            print!("{}", render::spanning_dot(&engine.minimum_spanning_tree()?));
        }
        _ => anyhow::bail!(USAGE),
    }

    Ok(())
}
