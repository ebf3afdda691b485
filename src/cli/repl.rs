//! Interactive REPL for Wayfare
//!
//! Provides the main user interaction loop. Each submitted request runs a
//! fresh reasoning loop; nothing is carried over between requests.

use std::io::{self, BufRead, Write};

use crate::agent::Controller;
use crate::cli::commands::{handle_command, CommandResult};
use crate::core::{Config, Result};
use crate::llm::ChatClient;
use crate::tools::ToolRegistry;

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    controller: Controller<ChatClient>,
}

impl Repl {
    /// Create a REPL with custom configuration
    pub fn with_config(config: Config) -> Self {
        let provider = ChatClient::from_config(&config);
        let tools = ToolRegistry::with_default_tools(&config);
        Self {
            controller: Controller::new(config, provider, tools),
        }
    }

    /// Run the REPL
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner();

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("You: ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    // EOF (Ctrl+D)
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            }

            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            match handle_command(input, &mut self.controller) {
                Ok(CommandResult::Exit) => {
                    println!("\nGoodbye!");
                    break;
                }
                Ok(CommandResult::Handled(output)) => {
                    println!("{}\n", output);
                    continue;
                }
                Ok(CommandResult::Continue(request)) => {
                    match self.controller.process(&request).await {
                        Ok(answer) => {
                            println!("\nAssistant:\n{}\n", answer);
                        }
                        Err(e) => {
                            eprintln!("\nRequest failed: {}\n", e);
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Command error: {}\n", e);
                }
            }
        }

        Ok(())
    }

    /// Print the startup banner
    fn print_banner(&self) {
        let config = self.controller.config();

        println!(
            r#"
╔═══════════════════════════════════════════╗
║                                           ║
║   Wayfare — reason-then-act travel agent  ║
║                                           ║
╚═══════════════════════════════════════════╝
"#
        );
        println!("Endpoint:  {}", config.llm.endpoint);
        println!("Model:     {}", config.llm.model);
        println!("Max turns: {}", config.agent.max_turns);
        println!();
        println!("Commands: help, status, tools, set, debug, exit");
        println!("───────────────────────────────────────────");
    }
}
