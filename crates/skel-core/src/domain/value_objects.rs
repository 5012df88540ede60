//! Domain value objects: ClassName, ReadModelName, TypeRef, Parameter, Role,
//! Profile and the generation policies.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Every
//! constructor validates, so a `ClassName` or `Parameter` that exists is
//! always renderable as PHP. Parsing failures are `DomainError`s; the input
//! layer turns them into re-prompts.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Words PHP refuses as class names (compared case-insensitively).
const RESERVED_CLASS_WORDS: &[&str] = &[
    "abstract", "and", "array", "as", "bool", "break", "callable", "case", "catch", "class",
    "clone", "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "empty",
    "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile", "enum", "eval",
    "exit", "extends", "false", "final", "finally", "float", "fn", "for", "foreach", "function",
    "global", "goto", "if", "implements", "include", "instanceof", "insteadof", "int",
    "interface", "isset", "iterable", "list", "match", "mixed", "namespace", "never", "new",
    "null", "object", "or", "parent", "print", "private", "protected", "public", "readonly",
    "require", "return", "self", "static", "string", "switch", "throw", "trait", "true", "try",
    "unset", "use", "var", "void", "while", "xor", "yield",
];

fn is_reserved(word: &str) -> bool {
    RESERVED_CLASS_WORDS.contains(&word.to_ascii_lowercase().as_str())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ── ClassName ─────────────────────────────────────────────────────────────────

/// A fully qualified PHP class reference, e.g. `App\ReadModel\OrderEntity`.
///
/// Invariant: every segment is a valid PHP identifier and the short name is
/// not a reserved word. Namespace segments may be reserved words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName {
    namespace: Vec<String>,
    short: String,
}

impl ClassName {
    /// Parse a class reference. A leading `\` is accepted and dropped.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let name = Self::parse_segments(input)?;
        if is_reserved(&name.short) {
            return Err(DomainError::InvalidClassName {
                name: input.to_string(),
                reason: format!("'{}' is a reserved word", name.short),
            });
        }
        Ok(name)
    }

    fn parse_segments(input: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidClassName {
            name: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('\\').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(invalid("name cannot be empty"));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('\\') {
            if segment.is_empty() {
                return Err(invalid("empty namespace segment"));
            }
            if !is_identifier(segment) {
                return Err(invalid(&format!("'{segment}' is not a valid identifier")));
            }
            segments.push(segment.to_string());
        }

        // split() always yields at least one item
        let short = segments.pop().unwrap_or_default();
        Ok(Self {
            namespace: segments,
            short,
        })
    }

    /// The unqualified class name (`OrderEntity`).
    pub fn short_name(&self) -> &str {
        &self.short
    }

    /// Namespace segments, outermost first.
    pub fn namespace_segments(&self) -> &[String] {
        &self.namespace
    }

    /// The namespace joined with `\`, or `None` for the global namespace.
    pub fn namespace(&self) -> Option<String> {
        if self.namespace.is_empty() {
            None
        } else {
            Some(self.namespace.join("\\"))
        }
    }

    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Fully qualified name without a leading backslash.
    pub fn fqn(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{ns}\\{}", self.short),
            None => self.short.clone(),
        }
    }

    /// Same namespace, short name with `suffix` appended.
    ///
    /// Suffixes are trusted identifiers supplied by the caller.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            namespace: self.namespace.clone(),
            short: format!("{}{suffix}", self.short),
        }
    }

    /// Same class moved under an extra outermost namespace segment
    /// (`spec` + `App\Order` = `spec\App\Order`).
    pub fn under_root_namespace(&self, root: &str) -> Self {
        let mut namespace = Vec::with_capacity(self.namespace.len() + 1);
        namespace.push(root.to_string());
        namespace.extend(self.namespace.iter().cloned());
        Self {
            namespace,
            short: self.short.clone(),
        }
    }

    /// Whether both names live in the same namespace.
    pub fn same_namespace(&self, other: &ClassName) -> bool {
        self.namespace == other.namespace
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqn())
    }
}

impl FromStr for ClassName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClassName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClassName> for String {
    fn from(value: ClassName) -> Self {
        value.fqn()
    }
}

// ── ReadModelName ─────────────────────────────────────────────────────────────

/// The suffix-free base name the user types (`Order`, `App\ReadModel\Order`).
///
/// Invariant: the short name never ends with a role suffix. The generator
/// owns suffixing through [`ReadModelName::class_for`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct ReadModelName(ClassName);

impl ReadModelName {
    /// Parse a base name. Only suffixed names are ever emitted, so a
    /// reserved short name such as `List` is allowed here.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let name = ClassName::parse_segments(input)?;
        if let Some(role) = Role::ALL
            .iter()
            .find(|role| name.short_name().ends_with(role.suffix()))
        {
            return Err(DomainError::SuffixedBaseName {
                name: name.fqn(),
                suffix: role.suffix(),
            });
        }
        Ok(Self(name))
    }

    /// The generated class name for a role (`Order` → `OrderRepository`).
    pub fn class_for(&self, role: Role) -> ClassName {
        self.0.with_suffix(role.suffix())
    }

    pub fn as_class_name(&self) -> &ClassName {
        &self.0
    }
}

impl fmt::Display for ReadModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ReadModelName> for String {
    fn from(value: ReadModelName) -> Self {
        value.0.fqn()
    }
}

// ── TypeRef ───────────────────────────────────────────────────────────────────

/// PHP built-in types accepted for constructor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Bool,
    Array,
    Mixed,
}

impl ScalarType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Array => "array",
            Self::Mixed => "mixed",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "int" | "integer" => Some(Self::Int),
            "float" | "double" => Some(Self::Float),
            "string" => Some(Self::String),
            "bool" | "boolean" => Some(Self::Bool),
            "array" => Some(Self::Array),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared type of a parameter or property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Scalar(ScalarType),
    Class(ClassName),
}

impl TypeRef {
    pub fn class_name(&self) -> Option<&ClassName> {
        match self {
            Self::Class(name) => Some(name),
            Self::Scalar(_) => None,
        }
    }
}

impl From<ClassName> for TypeRef {
    fn from(value: ClassName) -> Self {
        Self::Class(value)
    }
}

impl From<ScalarType> for TypeRef {
    fn from(value: ScalarType) -> Self {
        Self::Scalar(value)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => scalar.fmt(f),
            Self::Class(name) => name.fmt(f),
        }
    }
}

impl FromStr for TypeRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidType {
                input: s.to_string(),
                reason: "type cannot be empty".into(),
            });
        }
        if let Some(scalar) = ScalarType::parse(s) {
            return Ok(Self::Scalar(scalar));
        }
        ClassName::parse(s)
            .map(Self::Class)
            .map_err(|e| DomainError::InvalidType {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

// ── Parameter ─────────────────────────────────────────────────────────────────

/// A constructor (or method) argument: `$name` of type `type_ref`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    name: String,
    type_ref: TypeRef,
}

impl Parameter {
    /// Validate `name` as a PHP variable name. A leading `$` is dropped.
    pub fn new(name: &str, type_ref: impl Into<TypeRef>) -> Result<Self, DomainError> {
        Ok(Self {
            name: Self::parse_name(name)?,
            type_ref: type_ref.into(),
        })
    }

    /// Parse just the variable-name half of a parameter.
    pub fn parse_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let invalid = |reason: &str| DomainError::InvalidParameter {
            input: name.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if !is_identifier(trimmed) {
            return Err(invalid("not a valid PHP variable name"));
        }
        if trimmed == "this" {
            return Err(invalid("'$this' cannot be used as a parameter"));
        }
        Ok(trimmed.to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// `orderId` → `OrderId`, for getter names.
    pub fn capitalized_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.type_ref)
    }
}

impl FromStr for Parameter {
    type Err = DomainError;

    /// Parses the `name:type` form used by `--param`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, ty) = s.split_once(':').ok_or_else(|| DomainError::InvalidParameter {
            input: s.to_string(),
            reason: "expected name:type".into(),
        })?;
        let type_ref = ty.parse::<TypeRef>()?;
        Self::new(name, type_ref)
    }
}

// ── Role ──────────────────────────────────────────────────────────────────────

/// One of the generated read-model classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Entity,
    Repository,
    Factory,
    Projector,
}

impl Role {
    pub const ALL: [Role; 4] = [Self::Entity, Self::Repository, Self::Factory, Self::Projector];

    /// Class name suffix appended to the base name.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Entity => "Entity",
            Self::Repository => "Repository",
            Self::Factory => "Factory",
            Self::Projector => "Projector",
        }
    }

    /// Key of the template that generates this role.
    pub const fn template_key(&self) -> &'static str {
        match self {
            Self::Entity => "read-entity",
            Self::Repository => "read-repository",
            Self::Factory => "read-factory",
            Self::Projector => "read-projector",
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Repository => "repository",
            Self::Factory => "factory",
            Self::Projector => "projector",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Profile ───────────────────────────────────────────────────────────────────

/// Which flavour of read model to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Broadway's own read-model repositories.
    Plain,
    /// Entities backed by an ORM engine; adds a factory role.
    PersistenceEngine,
}

impl Profile {
    pub const ALL: [Profile; 2] = [Self::Plain, Self::PersistenceEngine];

    /// Roles generated by this profile, in emission order.
    pub const fn roles(&self) -> &'static [Role] {
        match self {
            Self::Plain => &[Role::Entity, Role::Repository, Role::Projector],
            Self::PersistenceEngine => &Role::ALL,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::PersistenceEngine => "persistence-engine",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Policies ──────────────────────────────────────────────────────────────────

/// Whether paired spec files are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecPolicy {
    /// Confirm once per role (default answer: yes).
    #[default]
    Ask,
    Always,
    Never,
}

/// What happens when a destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    #[default]
    Fail,
    Overwrite,
}
