//! Wayfare - reason-then-act travel assistant
//!
//! Main entry point for the CLI application.

use clap::Parser;
use wayfare::{ChatClient, Config, Controller, Repl, ToolRegistry};

/// Wayfare - reason-then-act travel assistant
#[derive(Parser, Debug)]
#[command(name = "wayfare")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat model identifier
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long)]
    endpoint: Option<String>,

    /// Maximum reasoning turns per request
    #[arg(long)]
    max_turns: Option<usize>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Single prompt mode (non-interactive)
    #[arg(long, short = 'p')]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.model {
        config.llm.model = model.clone();
    }

    if let Some(ref endpoint) = args.endpoint {
        config.llm.endpoint = endpoint.clone();
    }

    if let Some(max_turns) = args.max_turns {
        config.agent.max_turns = max_turns;
    }

    if args.debug {
        config.agent.debug = true;
    }

    // Single prompt mode
    if let Some(prompt) = args.prompt {
        let provider = ChatClient::from_config(&config);
        let tools = ToolRegistry::with_default_tools(&config);
        let controller = Controller::new(config, provider, tools);

        let answer = controller.process(&prompt).await?;
        println!("{}", answer);
        return Ok(());
    }

    // Interactive REPL mode
    let mut repl = Repl::with_config(config);
    repl.run().await?;

    Ok(())
}
