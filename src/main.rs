use std::env;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wealthplan::api::{self, PlanCli, ProjectCli};

const USAGE: &str = "Usage: wealthplan serve [port] | wealthplan plan [flags] | wealthplan project [flags]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wealthplan=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args: Vec<String> = env::args().collect();
    let report = match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
            return;
        }
        // The subcommand name stands in for the binary name when clap parses.
        Some("plan") => api::run_plan_cli(PlanCli::parse_from(&raw_args[1..])),
        Some("project") => api::run_project_cli(ProjectCli::parse_from(&raw_args[1..])),
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    match report {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
