pub(crate) type IndexedToken = (usize, String);

/// Identifies one declared parameter slot throughout matching and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum SlotId {
    Option(String),
    Positional(usize),
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotId::Option(name) => write!(f, "--{name}"),
            // Positions render 1-based.
            SlotId::Positional(position) => write!(f, "positional #{n}", n = position + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct OptionConfig {
    name: String,
}

impl OptionConfig {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PositionalConfig {
    position: usize,
}

impl PositionalConfig {
    pub(crate) fn new(position: usize) -> Self {
        Self { position }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }
}

/// One parameter occurrence aligned against the token sequence.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MatchTokens {
    /// The slot that matched.
    pub slot: SlotId,
    /// Every token index this match consumed (marker and value for options).
    pub consumed: Vec<usize>,
    /// The value token to route through conversion.
    pub value: IndexedToken,
}
