//! Read-model class templates.
//!
//! Each function is a pure generator: the same class name and parameters
//! always produce an equal [`ClassSource`]. The application layer registers
//! them under template keys (see `TemplateRegistry::for_profile`).
//!
//! Repository and factory templates treat extra parameters as additional
//! constructor dependencies, appended after their own.

use crate::domain::{
    entities::class_source::{ClassSource, ClassSourceBuilder, Method, Property, ReturnType},
    error::DomainError,
    value_objects::{ClassName, Parameter, Role, ScalarType, TypeRef},
};

pub const SERIALIZABLE_READ_MODEL: &str = "Broadway\\ReadModel\\SerializableReadModel";
pub const BROADWAY_REPOSITORY: &str = "Broadway\\ReadModel\\Repository";
pub const BROADWAY_PROJECTOR: &str = "Broadway\\ReadModel\\Projector";
pub const ENTITY_MANAGER: &str = "Doctrine\\ORM\\EntityManagerInterface";

/// Base class for persistence-engine entities unless configured otherwise.
pub const DEFAULT_ENTITY_BASE_CLASS: &str = "Broadway\\ReadModel\\DoctrineOrm\\ReadModelEntity";

/// The class playing `other` next to `class` (which plays `own`):
/// `OrderRepository` + Entity → `OrderEntity`.
pub fn sibling(class: &ClassName, own: Role, other: Role) -> Result<ClassName, DomainError> {
    let short = class.short_name();
    let base = short.strip_suffix(own.suffix()).unwrap_or(short);
    let short = format!("{base}{}", other.suffix());
    match class.namespace() {
        Some(ns) => ClassName::parse(&format!("{ns}\\{short}")),
        None => ClassName::parse(&short),
    }
}

fn with_dependencies(mut builder: ClassSourceBuilder, dependencies: &[Parameter]) -> ClassSourceBuilder {
    builder = builder.constructor(dependencies.iter().cloned());
    for dependency in dependencies {
        builder = builder.property(Property::private_from(dependency));
    }
    builder
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// `id`, `Id` and `ID` all map onto the `getId()` getter.
fn is_id(parameter: &Parameter) -> bool {
    parameter.name().eq_ignore_ascii_case("id")
}

/// Serializable read-model entity holding the user's properties.
///
/// `base_class` is set by the persistence-engine profile.
pub fn entity(
    class: &ClassName,
    parameters: &[Parameter],
    base_class: Option<&ClassName>,
) -> Result<ClassSource, DomainError> {
    let mut builder = ClassSource::builder(class.clone());
    if let Some(base) = base_class {
        builder = builder.extends(base.clone());
    }
    builder = builder.implements(ClassName::parse(SERIALIZABLE_READ_MODEL)?);
    builder = with_dependencies(builder, parameters);

    let id = parameters
        .iter()
        .find(|p| is_id(p))
        .or_else(|| parameters.first());

    let get_id = Method::public("getId").returns(ReturnType::Type(ScalarType::String.into()));
    builder = builder.method(match id {
        Some(id) => get_id.line(format!("return (string) $this->{};", id.name())),
        None => get_id.line("throw new \\LogicException('Read model has no identifier.');"),
    });

    for parameter in parameters.iter().filter(|p| !is_id(p)) {
        builder = builder.method(
            Method::public(format!("get{}", parameter.capitalized_name()))
                .returns(ReturnType::Type(parameter.type_ref().clone()))
                .line(format!("return $this->{};", parameter.name())),
        );
    }

    let mut serialize =
        Method::public("serialize").returns(ReturnType::Type(ScalarType::Array.into()));
    let mut deserialize = Method::public("deserialize")
        .static_method()
        .parameter(Parameter::new("data", ScalarType::Array)?);

    if parameters.is_empty() {
        serialize = serialize.line("return [];");
        deserialize = deserialize.line("return new self();");
    } else {
        serialize = serialize.line("return [");
        for parameter in parameters {
            serialize = serialize.line(format!(
                "    '{0}' => $this->{0},",
                parameter.name()
            ));
        }
        serialize = serialize.line("];");

        deserialize = deserialize.line("return new self(");
        let last = parameters.len() - 1;
        for (index, parameter) in parameters.iter().enumerate() {
            let separator = if index == last { "" } else { "," };
            deserialize = deserialize.line(format!("    $data['{}']{separator}", parameter.name()));
        }
        deserialize = deserialize.line(");");
    }

    builder.method(serialize).method(deserialize).build()
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Repository delegating to Broadway's read-model repository.
pub fn repository(class: &ClassName, parameters: &[Parameter]) -> Result<ClassSource, DomainError> {
    let entity = sibling(class, Role::Repository, Role::Entity)?;
    let mut dependencies = vec![Parameter::new(
        "repository",
        ClassName::parse(BROADWAY_REPOSITORY)?,
    )?];
    dependencies.extend(parameters.iter().cloned());

    with_dependencies(ClassSource::builder(class.clone()), &dependencies)
        .method(
            Method::public("save")
                .parameter(Parameter::new("entity", entity.clone())?)
                .returns(ReturnType::Void)
                .line("$this->repository->save($entity);"),
        )
        .method(
            Method::public("find")
                .parameter(Parameter::new("id", ScalarType::String)?)
                .returns(ReturnType::Nullable(TypeRef::Class(entity)))
                .line("return $this->repository->find($id);"),
        )
        .method(
            Method::public("findAll")
                .returns(ReturnType::Type(ScalarType::Array.into()))
                .line("return $this->repository->findAll();"),
        )
        .method(
            Method::public("remove")
                .parameter(Parameter::new("id", ScalarType::String)?)
                .returns(ReturnType::Void)
                .line("$this->repository->remove($id);"),
        )
        .build()
}

/// Repository backed by the ORM entity manager.
pub fn persistence_repository(
    class: &ClassName,
    parameters: &[Parameter],
) -> Result<ClassSource, DomainError> {
    let entity = sibling(class, Role::Repository, Role::Entity)?;
    let entity_ref = format!("{}::class", entity.short_name());
    let mut dependencies = vec![Parameter::new(
        "entityManager",
        ClassName::parse(ENTITY_MANAGER)?,
    )?];
    dependencies.extend(parameters.iter().cloned());

    with_dependencies(ClassSource::builder(class.clone()), &dependencies)
        .method(
            Method::public("save")
                .parameter(Parameter::new("entity", entity.clone())?)
                .returns(ReturnType::Void)
                .line("$this->entityManager->persist($entity);")
                .line("$this->entityManager->flush();"),
        )
        .method(
            Method::public("find")
                .parameter(Parameter::new("id", ScalarType::String)?)
                .returns(ReturnType::Nullable(TypeRef::Class(entity)))
                .line(format!("return $this->entityManager->find({entity_ref}, $id);")),
        )
        .method(
            Method::public("findAll")
                .returns(ReturnType::Type(ScalarType::Array.into()))
                .line(format!(
                    "return $this->entityManager->getRepository({entity_ref})->findAll();"
                )),
        )
        .method(
            Method::public("remove")
                .parameter(Parameter::new("id", ScalarType::String)?)
                .returns(ReturnType::Void)
                .line("$entity = $this->find($id);")
                .line("if (null !== $entity) {")
                .line("    $this->entityManager->remove($entity);")
                .line("    $this->entityManager->flush();")
                .line("}"),
        )
        .build()
}

// ── Factory ───────────────────────────────────────────────────────────────────

/// Factory turning stored rows back into entities.
pub fn factory(class: &ClassName, parameters: &[Parameter]) -> Result<ClassSource, DomainError> {
    let entity = sibling(class, Role::Factory, Role::Entity)?;
    let body = format!("return {}::deserialize($data);", entity.short_name());

    with_dependencies(ClassSource::builder(class.clone()), parameters)
        .method(
            Method::public("create")
                .parameter(Parameter::new("data", ScalarType::Array)?)
                .returns(ReturnType::Type(TypeRef::Class(entity)))
                .line(body),
        )
        .build()
}

// ── Projector ─────────────────────────────────────────────────────────────────

/// Projector wired to the collaborators it is given, in order.
pub fn projector(class: &ClassName, parameters: &[Parameter]) -> Result<ClassSource, DomainError> {
    with_dependencies(ClassSource::builder(class.clone()), parameters)
        .extends(ClassName::parse(BROADWAY_PROJECTOR)?)
        .build()
}
