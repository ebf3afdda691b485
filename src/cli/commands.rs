//! CLI commands
//!
//! Special commands that can be executed in the REPL.

use crate::agent::Controller;
use crate::core::Result;
use crate::llm::ChatClient;

/// Result of parsing a command
pub enum CommandResult {
    /// Continue processing as normal input
    Continue(String),
    /// Command was handled, show output
    Handled(String),
    /// Exit the REPL
    Exit,
}

/// Parse and handle special commands
pub fn handle_command(input: &str, controller: &mut Controller<ChatClient>) -> Result<CommandResult> {
    let input = input.trim();
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd.as_str() {
        "exit" | "quit" | "q" => Ok(CommandResult::Exit),

        "help" | "?" => Ok(CommandResult::Handled(help_text())),

        "tools" => {
            let names = controller.tools().names();
            let output = format!(
                "Registered tools:\n{}",
                names
                    .iter()
                    .map(|name| format!("  - {}", name))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
            Ok(CommandResult::Handled(output))
        }

        "set" => handle_set_command(args, controller),

        "status" => {
            let config = controller.config();
            let status = format!(
                "Wayfare Status:\n\
                 ─────────────────────────────\n\
                 Provider:  {}\n\
                 Endpoint:  {}\n\
                 Model:     {}\n\
                 Max turns: {}\n\
                 Tools:     {}\n\
                 Debug:     {}",
                controller.provider_name(),
                config.llm.endpoint,
                config.llm.model,
                config.agent.max_turns,
                controller.tools().len(),
                if config.agent.debug { "on" } else { "off" }
            );
            Ok(CommandResult::Handled(status))
        }

        "debug" => {
            let new_state = !controller.config().agent.debug;
            controller.set_debug(new_state);
            Ok(CommandResult::Handled(format!(
                "Debug mode: {}",
                if new_state { "ON" } else { "OFF" }
            )))
        }

        _ => {
            // Not a command, treat as normal input
            if input.starts_with('/') {
                Ok(CommandResult::Handled(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    cmd
                )))
            } else {
                Ok(CommandResult::Continue(input.to_string()))
            }
        }
    }
}

/// Handle 'set' subcommands
fn handle_set_command(
    args: &str,
    controller: &mut Controller<ChatClient>,
) -> Result<CommandResult> {
    let parts: Vec<&str> = args.splitn(2, ' ').collect();

    if parts.is_empty() || parts[0].is_empty() {
        return Ok(CommandResult::Handled(
            "Usage: set <max-turns|debug> <value>\n\
             Examples:\n\
               set max-turns 5\n\
               set debug on"
                .to_string(),
        ));
    }

    let key = parts[0].to_lowercase();
    let value = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match key.as_str() {
        "max-turns" => {
            if value.is_empty() {
                return Ok(CommandResult::Handled(format!(
                    "Current max turns: {}",
                    controller.config().agent.max_turns
                )));
            }
            match value.parse::<usize>() {
                Ok(turns) if turns > 0 => {
                    controller.config_mut().agent.max_turns = turns;
                    Ok(CommandResult::Handled(format!("Max turns set to: {}", turns)))
                }
                _ => Ok(CommandResult::Handled(format!(
                    "Invalid turn count: {}",
                    value
                ))),
            }
        }

        "debug" => {
            let enabled = matches!(value.to_lowercase().as_str(), "on" | "true" | "1" | "yes");
            controller.set_debug(enabled);
            Ok(CommandResult::Handled(format!(
                "Debug mode: {}",
                if enabled { "ON" } else { "OFF" }
            )))
        }

        _ => Ok(CommandResult::Handled(format!(
            "Unknown setting: {}. Available: max-turns, debug",
            key
        ))),
    }
}

/// Generate help text
fn help_text() -> String {
    r#"Wayfare Commands:
─────────────────────────────────────────────
  help, ?          Show this help message
  exit, quit, q    Exit Wayfare
  status           Show current configuration
  tools            List registered tools
  debug            Toggle debug output

  set max-turns <n>          Set the reasoning turn budget
  set debug <on|off>         Enable/disable debug output

Notes:
  - Each request runs its own reasoning loop; no history is
    carried between requests.
─────────────────────────────────────────────"#
        .to_string()
}
