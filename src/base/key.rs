use std::fmt;

/// Identity of a field or method inside its owning class.
///
/// Fields and methods are keyed by name and descriptor so overloads stay
/// distinct. Ordering is by name, then descriptor, which gives the natural
/// member order used when emitting mappings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberKey {
    pub name: String,
    pub desc: String,
}

impl MemberKey {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
        }
    }

    /// Constructors and static initializers (`<init>`, `<clinit>`).
    pub fn is_initializer(&self) -> bool {
        self.name.starts_with('<')
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.desc.starts_with('(') {
            write!(f, "{}{}", self.name, self.desc)
        } else {
            write!(f, "{}:{}", self.name, self.desc)
        }
    }
}

/// The three kinds of symbol that receive generated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Class,
    Field,
    Method,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 3] = [SymbolKind::Class, SymbolKind::Field, SymbolKind::Method];

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Field => "field",
            SymbolKind::Method => "method",
        }
    }

    /// Infix every generated name of this kind carries, e.g. `field_`.
    pub fn infix(self) -> &'static str {
        match self {
            SymbolKind::Class => "class_",
            SymbolKind::Field => "field_",
            SymbolKind::Method => "method_",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "class" => Some(SymbolKind::Class),
            "field" => Some(SymbolKind::Field),
            "method" => Some(SymbolKind::Method),
            _ => None,
        }
    }

    /// Whether `name` looks like a name this kind's generator produced.
    pub fn is_generated(self, name: &str) -> bool {
        name.contains(self.infix())
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
