//! Loop controller
//!
//! The state machine driving the reason-then-act cycle: serialize history,
//! call the model, parse the reply into a directive, dispatch tools, feed
//! observations back, and repeat until the model finishes or the turn
//! budget runs out.

use crate::agent::directive::{self, Directive};
use crate::agent::history::History;
use crate::agent::prompt::build_system_prompt;
use crate::core::retry::with_backoff;
use crate::core::{Config, Result, WayfareError};
use crate::llm::LlmProvider;
use crate::tools::ToolRegistry;

/// State of one reasoning loop
#[derive(Debug)]
enum LoopState {
    /// Iterating; holds the number of completed turns
    Running(usize),
    /// Terminal: the model produced a final answer
    Finished(String),
    /// Terminal: the request failed
    Failed(WayfareError),
}

/// Drives one reasoning loop per user request.
///
/// The provider and the tool registry are injected at construction and
/// never mutated afterwards; the registry is read-only for the whole run.
pub struct Controller<P: LlmProvider> {
    config: Config,
    provider: P,
    tools: ToolRegistry,
    system_prompt: String,
}

impl<P: LlmProvider> Controller<P> {
    /// Create a controller from configuration, a model provider, and a
    /// tool registry
    pub fn new(config: Config, provider: P, tools: ToolRegistry) -> Self {
        let system_prompt =
            build_system_prompt(&tools, config.agent.system_preamble.as_deref());
        Self {
            config,
            provider,
            tools,
            system_prompt,
        }
    }

    /// Process a user request to completion.
    ///
    /// Returns the final answer, or the failure reason as a typed error:
    /// a reply without an action, an exhausted turn budget, or a model
    /// service failure that survived the retry policy. History lives only
    /// for the duration of this call.
    pub async fn process(&self, request: &str) -> Result<String> {
        let mut history = History::new(request);
        let max_turns = self.config.agent.max_turns;
        let mut state = LoopState::Running(0);

        loop {
            let turn = match state {
                LoopState::Running(n) => n,
                LoopState::Finished(answer) => return Ok(answer),
                LoopState::Failed(reason) => return Err(reason),
            };

            if turn >= max_turns {
                state = LoopState::Failed(WayfareError::TurnBudgetExhausted);
                continue;
            }

            if self.config.agent.debug {
                eprintln!("DEBUG: turn {}/{}", turn + 1, max_turns);
            }

            let reply = match self.generate_with_retry(&history.as_prompt()).await {
                Ok(reply) => reply,
                // A service failure is not fed back into the prompt as if
                // the model had said it; the request fails with a distinct
                // reason once the retry budget is spent.
                Err(e) => {
                    state = LoopState::Failed(e);
                    continue;
                }
            };
            history.push_reply(&reply);

            state = match directive::parse(&reply) {
                Directive::Finish { answer } => LoopState::Finished(answer),
                Directive::Malformed { raw_text } => {
                    if self.config.agent.debug {
                        eprintln!("DEBUG: unparseable reply: {}", raw_text);
                    }
                    LoopState::Failed(WayfareError::NoActionFound)
                }
                Directive::Invoke {
                    tool_name,
                    arguments,
                } => {
                    let observation = self.tools.dispatch(&tool_name, &arguments).await;
                    if self.config.agent.debug {
                        eprintln!("DEBUG: {} -> {}", tool_name, observation);
                    }
                    history.push_observation(&observation);
                    LoopState::Running(turn + 1)
                }
            };
        }
    }

    /// Call the model, retrying transient service failures with backoff
    async fn generate_with_retry(&self, prompt: &str) -> Result<String> {
        with_backoff(&self.config.retry, || {
            self.provider.generate(&self.system_prompt, prompt)
        })
        .await
    }

    /// Get current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get the provider name
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Enable or disable debug output
    pub fn set_debug(&mut self, debug: bool) {
        self.config.agent.debug = debug;
    }
}
