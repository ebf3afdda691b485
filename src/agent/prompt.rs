//! System prompt assembly
//!
//! Builds the fixed instruction template sent unchanged with every model
//! call: the assistant's role, the tool catalogue from the registry, and
//! the exact action syntax the directive parser understands.

use crate::tools::ToolRegistry;

/// Build the system prompt for a reasoning loop.
///
/// `preamble` is optional extra text from configuration, placed before the
/// standard template.
pub fn build_system_prompt(registry: &ToolRegistry, preamble: Option<&str>) -> String {
    let catalogue = registry.describe();

    let template = format!(
        r#"You are a travel assistant. Analyze the user's request and solve it step by step using the available tools.

# Available tools:
{}

# Action format:
Your reply must strictly follow this format. First your reasoning, then the single action to take:
Thought: [your reasoning and plan for the next step]
Action: [the tool to call, as tool_name(arg_name="arg_value", ...)]

# Finishing:
Once you have gathered enough information to answer the user's request, you must use finish(answer="...") to give the final answer:
Thought: [your reasoning]
Action: finish(answer="[the final answer]")

Begin!"#,
        catalogue
    );

    match preamble {
        Some(text) if !text.is_empty() => format!("{}\n\n{}", text, template),
        _ => template,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolRegistry;

    #[test]
    fn test_prompt_contains_action_syntax() {
        let registry = ToolRegistry::new();
        let prompt = build_system_prompt(&registry, None);
        assert!(prompt.contains("Thought:"));
        assert!(prompt.contains("Action:"));
        assert!(prompt.contains("finish(answer="));
    }

    #[test]
    fn test_preamble_is_prepended() {
        let registry = ToolRegistry::new();
        let prompt = build_system_prompt(&registry, Some("Answer in French."));
        assert!(prompt.starts_with("Answer in French."));
    }
}
