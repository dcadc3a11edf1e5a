//! Semantic model of a protocol state diagram.
//!
//! The types here are produced by the parser after validation and consumed by
//! the renderer. Each table-backed type wraps the [`Record`] it was decoded
//! from and exposes the columns the diagram cares about; any extra columns
//! stay available through [`Entity::record`] and friends.

use indexmap::IndexMap;

use crate::record::Record;

/// Metadata key naming the diagram. Required in every document.
pub const DIAGRAM_KEY: &str = "diagram";

/// Returns `true` if `id` can name output files inside a directory.
///
/// The diagram id becomes the stem of every output file, so it must be a
/// single non-empty path component: no `/` or `\`, not `.` or `..`, no NUL.
pub fn is_file_stem(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\', '\0'])
}

/// Key/value pairs read from a document's front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: IndexMap<String, String>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. A repeated key overwrites the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`Metadata::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the diagram identifier, if present.
    pub fn diagram_id(&self) -> Option<&str> {
        self.get(DIAGRAM_KEY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A participant in the protocol, such as a controller or a radio node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    record: Record,
}

impl Entity {
    pub const ID: &'static str = "Id";

    pub fn new(record: Record) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &str {
        self.record.field(Self::ID)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// A node of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    record: Record,
}

impl State {
    pub const CODE: &'static str = "Code";
    pub const OWNER: &'static str = "Owner";
    pub const NAME: &'static str = "Name";
    pub const ROLE: &'static str = "Role";
    pub const DESCRIPTION: &'static str = "Description";

    pub fn new(record: Record) -> Self {
        Self { record }
    }

    /// Unique key referenced by transitions.
    pub fn code(&self) -> &str {
        self.record.field(Self::CODE)
    }

    /// Entity id (or the `ARM` sentinel) owning this state. May be empty.
    pub fn owner(&self) -> &str {
        self.record.field(Self::OWNER)
    }

    pub fn name(&self) -> &str {
        self.record.field(Self::NAME)
    }

    pub fn role(&self) -> &str {
        self.record.field(Self::ROLE)
    }

    pub fn description(&self) -> &str {
        self.record.field(Self::DESCRIPTION)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// A directed edge between two states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    record: Record,
}

impl Transition {
    pub const FROM: &'static str = "From";
    pub const TO: &'static str = "To";
    pub const MESSAGE: &'static str = "Message";
    pub const TRIGGER: &'static str = "Trigger";
    pub const NOTES: &'static str = "Notes";

    pub fn new(record: Record) -> Self {
        Self { record }
    }

    pub fn from(&self) -> &str {
        self.record.field(Self::FROM)
    }

    pub fn to(&self) -> &str {
        self.record.field(Self::TO)
    }

    pub fn message(&self) -> &str {
        self.record.field(Self::MESSAGE)
    }

    /// The command referenced by the message: its first whitespace-delimited
    /// token. `None` when the message is empty.
    pub fn command_id(&self) -> Option<&str> {
        self.message().split_whitespace().next()
    }

    pub fn trigger(&self) -> &str {
        self.record.field(Self::TRIGGER)
    }

    pub fn notes(&self) -> &str {
        self.record.field(Self::NOTES)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// A protocol command that transition messages refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    record: Record,
}

impl Command {
    pub const ID: &'static str = "Id";
    pub const PAYLOAD: &'static str = "Payload";

    pub fn new(record: Record) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &str {
        self.record.field(Self::ID)
    }

    pub fn payload(&self) -> &str {
        self.record.field(Self::PAYLOAD)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// A fully parsed and validated diagram document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramSpec {
    metadata: Metadata,
    entities: Vec<Entity>,
    states: Vec<State>,
    transitions: Vec<Transition>,
    commands: Vec<Command>,
}

impl DiagramSpec {
    pub fn new(
        metadata: Metadata,
        entities: Vec<Entity>,
        states: Vec<State>,
        transitions: Vec<Transition>,
        commands: Vec<Command>,
    ) -> Self {
        Self {
            metadata,
            entities,
            states,
            transitions,
            commands,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The `diagram` metadata value, or an empty string.
    pub fn diagram_id(&self) -> &str {
        self.metadata.diagram_id().unwrap_or_default()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Look up a command by id. A later definition shadows an earlier one.
    pub fn command(&self, id: &str) -> Option<&Command> {
        self.commands.iter().rev().find(|command| command.id() == id)
    }
}
