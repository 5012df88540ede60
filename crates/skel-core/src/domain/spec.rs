//! Paired phpspec descriptors.

use crate::domain::{
    entities::class_source::{ClassSource, Method},
    error::DomainError,
    value_objects::{ClassName, Parameter, ScalarType, TypeRef},
};

pub const OBJECT_BEHAVIOR: &str = "PhpSpec\\ObjectBehavior";

/// Root namespace phpspec expects specifications under.
pub const SPEC_NAMESPACE: &str = "spec";

/// Derive the specification of `source`.
///
/// `App\ReadModel\OrderEntity` gets `spec\App\ReadModel\OrderEntitySpec`.
/// Class-typed constructor parameters become `let` collaborators; scalars
/// are constructed with sample literals.
pub fn paired_spec(source: &ClassSource) -> Result<ClassSource, DomainError> {
    if source.is_spec() {
        return Err(DomainError::SpecOfSpec {
            class_name: source.name().fqn(),
        });
    }

    let subject = source.name().clone();
    let name = subject.with_suffix("Spec").under_root_namespace(SPEC_NAMESPACE);

    let mut builder = ClassSource::builder(name)
        .spec_of(subject.clone())
        .extends(ClassName::parse(OBJECT_BEHAVIOR)?);

    if !source.constructor().is_empty() {
        let mut let_method = Method::public("let");
        let mut arguments = Vec::with_capacity(source.constructor().len());
        for parameter in source.constructor() {
            match parameter.type_ref() {
                TypeRef::Class(_) => {
                    let_method = let_method.parameter(parameter.clone());
                    arguments.push(format!("${}", parameter.name()));
                }
                TypeRef::Scalar(scalar) => arguments.push(sample_literal(*scalar, parameter)),
            }
        }
        builder = builder.method(
            let_method.line(format!("$this->beConstructedWith({});", arguments.join(", "))),
        );
    }

    builder
        .method(Method::public("it_is_initializable").line(format!(
            "$this->shouldHaveType({}::class);",
            subject.short_name()
        )))
        .build()
}

fn sample_literal(scalar: ScalarType, parameter: &Parameter) -> String {
    match scalar {
        ScalarType::Int => "1".into(),
        ScalarType::Float => "1.0".into(),
        ScalarType::String => format!("'{}'", parameter.name()),
        ScalarType::Bool => "true".into(),
        ScalarType::Array => "[]".into(),
        ScalarType::Mixed => "null".into(),
    }
}
