use serde::{Deserialize, Serialize};

/// Telecommand kind, numbered by its wire command code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    NewLowPriority = 0,
    NewWithPriority = 1,
    Delete = 2,
    Sort = 3,
    Modify = 4,
    Print = 5,
    Reverse = 6,
    Execute = 7,
}

impl CommandKind {
    /// Map a wire command code to its kind
    ///
    /// Returns `None` for codes outside `0..=7`.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(CommandKind::NewLowPriority),
            1 => Some(CommandKind::NewWithPriority),
            2 => Some(CommandKind::Delete),
            3 => Some(CommandKind::Sort),
            4 => Some(CommandKind::Modify),
            5 => Some(CommandKind::Print),
            6 => Some(CommandKind::Reverse),
            7 => Some(CommandKind::Execute),
            _ => None,
        }
    }

    /// The wire command code of this kind
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Number of fields that follow the command code on the wire
    pub fn field_count(self) -> usize {
        match self {
            CommandKind::NewLowPriority | CommandKind::Delete => 1,
            CommandKind::NewWithPriority | CommandKind::Modify => 2,
            CommandKind::Sort | CommandKind::Print | CommandKind::Reverse | CommandKind::Execute => {
                0
            }
        }
    }

    /// Whether requests of this kind are stored in the queue
    ///
    /// Utility kinds act on the queue immediately instead.
    pub fn is_queueable(self) -> bool {
        matches!(
            self,
            CommandKind::NewLowPriority
                | CommandKind::NewWithPriority
                | CommandKind::Delete
                | CommandKind::Modify
        )
    }

    /// Stable name used in logs and diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::NewLowPriority => "new_low_priority",
            CommandKind::NewWithPriority => "new_with_priority",
            CommandKind::Delete => "delete",
            CommandKind::Sort => "sort",
            CommandKind::Modify => "modify",
            CommandKind::Print => "print",
            CommandKind::Reverse => "reverse",
            CommandKind::Execute => "execute",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command Entry - the unit stored and moved through the queue
///
/// Only the fields meaningful for `kind` carry information; the rest stay 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Unique, monotonically assigned identifier (never reused)
    pub entry_index: u32,

    pub kind: CommandKind,

    /// Ordering key for Sort; 0 unless supplied by the request
    pub priority: u32,

    /// Payload of new-command entries
    pub data: u32,

    /// Entry index a Delete/Modify refers to
    pub target_index: u32,

    /// Replacement payload carried by Modify
    pub new_data: u32,
}

impl CommandEntry {
    /// Create an entry of the given kind with all payload fields zeroed
    pub fn new(entry_index: u32, kind: CommandKind) -> Self {
        Self {
            entry_index,
            kind,
            priority: 0,
            data: 0,
            target_index: 0,
            new_data: 0,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_data(mut self, data: u32) -> Self {
        self.data = data;
        self
    }

    pub fn with_target(mut self, target_index: u32) -> Self {
        self.target_index = target_index;
        self
    }

    pub fn with_new_data(mut self, new_data: u32) -> Self {
        self.new_data = new_data;
        self
    }
}
