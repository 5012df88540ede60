//! In-memory description of a PHP class before it is rendered to text.
//!
//! A [`ClassSource`] is produced by a template, optionally paired with a spec
//! descriptor, and handed to a `SourceRenderer`. It is immutable once built:
//! every field is private and only readable through accessors.

use std::collections::HashSet;

use crate::domain::{
    error::DomainError,
    value_objects::{ClassName, Parameter, TypeRef},
};

/// What kind of file the descriptor renders to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A production class under the source directory.
    Class,
    /// A phpspec specification describing `subject`.
    Spec { subject: ClassName },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub type_ref: TypeRef,
    pub visibility: Visibility,
}

impl Property {
    /// A private property mirroring a constructor parameter.
    pub fn private_from(parameter: &Parameter) -> Self {
        Self {
            name: parameter.name().to_string(),
            type_ref: parameter.type_ref().clone(),
            visibility: Visibility::Private,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Type(TypeRef),
    /// `?Type`
    Nullable(TypeRef),
}

impl ReturnType {
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            Self::Void => None,
            Self::Type(t) | Self::Nullable(t) => Some(t),
        }
    }
}

/// A method stub. The body is literal PHP, one statement per line,
/// without indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<ReturnType>,
    pub body: Vec<String>,
}

impl Method {
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            parameters: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, return_type: ReturnType) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }
}

/// Structural description of one generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSource {
    name: ClassName,
    kind: SourceKind,
    parent: Option<ClassName>,
    interfaces: Vec<ClassName>,
    constructor: Vec<Parameter>,
    properties: Vec<Property>,
    methods: Vec<Method>,
}

impl ClassSource {
    pub fn builder(name: ClassName) -> ClassSourceBuilder {
        ClassSourceBuilder {
            source: ClassSource {
                name,
                kind: SourceKind::Class,
                parent: None,
                interfaces: Vec::new(),
                constructor: Vec::new(),
                properties: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &ClassName {
        &self.name
    }

    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    /// The class under test, for spec descriptors.
    pub fn subject(&self) -> Option<&ClassName> {
        match &self.kind {
            SourceKind::Spec { subject } => Some(subject),
            SourceKind::Class => None,
        }
    }

    pub fn is_spec(&self) -> bool {
        matches!(self.kind, SourceKind::Spec { .. })
    }

    pub fn parent(&self) -> Option<&ClassName> {
        self.parent.as_ref()
    }

    pub fn interfaces(&self) -> &[ClassName] {
        &self.interfaces
    }

    /// Constructor parameters in signature order.
    pub fn constructor(&self) -> &[Parameter] {
        &self.constructor
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Every class this descriptor mentions outside method bodies.
    pub fn referenced_classes(&self) -> Vec<&ClassName> {
        let mut refs: Vec<&ClassName> = Vec::new();
        refs.extend(self.parent.iter());
        refs.extend(self.interfaces.iter());
        refs.extend(self.subject());
        refs.extend(
            self.constructor
                .iter()
                .filter_map(|p| p.type_ref().class_name()),
        );
        refs.extend(
            self.properties
                .iter()
                .filter_map(|p| p.type_ref.class_name()),
        );
        for method in &self.methods {
            refs.extend(
                method
                    .parameters
                    .iter()
                    .filter_map(|p| p.type_ref().class_name()),
            );
            refs.extend(
                method
                    .return_type
                    .as_ref()
                    .and_then(ReturnType::type_ref)
                    .and_then(TypeRef::class_name),
            );
        }
        refs
    }

    /// Check member uniqueness. PHP method names are case-insensitive.
    pub fn validate(&self) -> Result<(), DomainError> {
        let duplicate = |member: &'static str, name: &str| DomainError::DuplicateMember {
            class_name: self.name.fqn(),
            member,
            name: name.to_string(),
        };

        let mut seen = HashSet::new();
        for param in &self.constructor {
            if !seen.insert(param.name()) {
                return Err(duplicate("constructor parameter", param.name()));
            }
        }

        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.name.as_str()) {
                return Err(duplicate("property", &property.name));
            }
        }

        let mut seen = HashSet::new();
        for method in &self.methods {
            if !seen.insert(method.name.to_ascii_lowercase()) {
                return Err(duplicate("method", &method.name));
            }
            let mut params = HashSet::new();
            for param in &method.parameters {
                if !params.insert(param.name()) {
                    return Err(duplicate("method parameter", param.name()));
                }
            }
        }

        Ok(())
    }
}

/// Builder for [`ClassSource`]; `build` enforces the member invariants.
#[derive(Debug)]
pub struct ClassSourceBuilder {
    source: ClassSource,
}

impl ClassSourceBuilder {
    pub fn spec_of(mut self, subject: ClassName) -> Self {
        self.source.kind = SourceKind::Spec { subject };
        self
    }

    pub fn extends(mut self, parent: ClassName) -> Self {
        self.source.parent = Some(parent);
        self
    }

    pub fn implements(mut self, interface: ClassName) -> Self {
        self.source.interfaces.push(interface);
        self
    }

    pub fn constructor(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.source.constructor.extend(parameters);
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.source.properties.push(property);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.source.methods.push(method);
        self
    }

    pub fn build(self) -> Result<ClassSource, DomainError> {
        self.source.validate()?;
        Ok(self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ScalarType;

    fn class(name: &str) -> ClassName {
        ClassName::parse(name).unwrap()
    }

    #[test]
    fn duplicate_constructor_parameters_are_rejected() {
        let id = Parameter::new("id", ScalarType::String).unwrap();
        let err = ClassSource::builder(class("OrderEntity"))
            .constructor([id.clone(), id])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::DuplicateMember {
                member: "constructor parameter",
                ..
            }
        ));
    }

    #[test]
    fn method_names_collide_case_insensitively() {
        let err = ClassSource::builder(class("OrderEntity"))
            .method(Method::public("getId"))
            .method(Method::public("GETID"))
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateMember { member: "method", .. }));
    }

    #[test]
    fn referenced_classes_cover_signatures() {
        let repo = class("App\\ReadModel\\OrderRepository");
        let source = ClassSource::builder(class("App\\ReadModel\\OrderProjector"))
            .extends(class("Broadway\\ReadModel\\Projector"))
            .constructor([Parameter::new("repository", repo.clone()).unwrap()])
            .method(
                Method::public("latest")
                    .returns(ReturnType::Nullable(class("App\\ReadModel\\OrderEntity").into())),
            )
            .build()
            .unwrap();

        let refs: Vec<String> = source
            .referenced_classes()
            .into_iter()
            .map(ClassName::fqn)
            .collect();
        assert_eq!(
            refs,
            vec![
                "Broadway\\ReadModel\\Projector",
                "App\\ReadModel\\OrderRepository",
                "App\\ReadModel\\OrderEntity",
            ]
        );
    }
}
