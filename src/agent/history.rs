//! Conversation history
//!
//! An append-only log of everything said during one request: the user
//! request, raw model replies, and tool observations. The log is replayed
//! verbatim as the prompt each turn, so insertion order is significant.
//! One history lives exactly as long as one reasoning loop.

/// What a history entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The original user request
    Request,
    /// A raw model reply
    Reply,
    /// The textual result of a tool execution
    Observation,
}

/// One entry in the conversation log
#[derive(Debug, Clone)]
pub struct Entry {
    pub kind: EntryKind,
    pub text: String,
}

/// Append-only conversation log for a single request
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    /// Create a history seeded with the user request as its sole entry
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            entries: vec![Entry {
                kind: EntryKind::Request,
                text: request.into(),
            }],
        }
    }

    /// Append a raw model reply
    pub fn push_reply(&mut self, reply: impl Into<String>) {
        self.entries.push(Entry {
            kind: EntryKind::Reply,
            text: reply.into(),
        });
    }

    /// Append a tool observation
    pub fn push_observation(&mut self, observation: impl Into<String>) {
        self.entries.push(Entry {
            kind: EntryKind::Observation,
            text: observation.into(),
        });
    }

    /// Serialize the full history into one prompt string.
    ///
    /// Entries are joined in insertion order. Observations get an
    /// `Observation:` prefix so the model can tell tool output apart from
    /// its own replies; requests and replies are replayed verbatim.
    pub fn as_prompt(&self) -> String {
        self.entries
            .iter()
            .map(|entry| match entry.kind {
                EntryKind::Observation => format!("Observation: {}", entry.text),
                _ => entry.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get all entries in order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Get entry count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty (never true for a seeded history)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
