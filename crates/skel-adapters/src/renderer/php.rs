//! PHP source renderer.
//!
//! Output follows PSR-12: strict types, one `use` per imported class sorted
//! alphabetically, four-space indentation, braces of classes and methods on
//! their own line.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

use skel_core::{
    application::ports::SourceRenderer,
    domain::{ClassName, ClassSource, Method, Parameter, Property, ReturnType, TypeRef},
    error::SkelResult,
};
use tracing::{instrument, trace};

const INDENT: &str = "    ";

/// Renders [`ClassSource`] descriptors to PHP files.
#[derive(Debug, Clone, Copy)]
pub struct PhpRenderer {
    strict_types: bool,
}

impl Default for PhpRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhpRenderer {
    /// Renderer emitting `declare(strict_types=1);`.
    pub fn new() -> Self {
        Self { strict_types: true }
    }

    pub fn with_strict_types(mut self, strict_types: bool) -> Self {
        self.strict_types = strict_types;
        self
    }
}

impl SourceRenderer for PhpRenderer {
    #[instrument(skip_all, fields(class = %source.name()))]
    fn render(&self, source: &ClassSource) -> SkelResult<String> {
        let names = Names::resolve(source);
        let mut out = String::from("<?php\n\n");

        if self.strict_types {
            out.push_str("declare(strict_types=1);\n\n");
        }
        if let Some(namespace) = source.name().namespace() {
            let _ = writeln!(out, "namespace {namespace};\n");
        }
        if !names.imports.is_empty() {
            for import in &names.imports {
                let _ = writeln!(out, "use {import};");
            }
            out.push('\n');
        }

        out.push_str(&class_header(source, &names));
        out.push_str("{\n");

        let mut sections: Vec<String> = Vec::new();
        if !source.properties().is_empty() {
            sections.push(
                source
                    .properties()
                    .iter()
                    .map(|p| property(p, &names))
                    .collect(),
            );
        }
        if !source.constructor().is_empty() {
            sections.push(constructor(source.constructor(), &names));
        }
        sections.extend(source.methods().iter().map(|m| method(m, &names)));

        out.push_str(&sections.join("\n"));
        out.push_str("}\n");

        trace!(bytes = out.len(), "Rendered PHP");
        Ok(out)
    }
}

/// How each referenced class is spelled inside the file.
struct Names<'a> {
    /// Fully qualified names needing a `use` line.
    imports: BTreeSet<String>,
    /// Short name → the fully qualified class it denotes in this file.
    short: HashMap<&'a str, String>,
}

impl<'a> Names<'a> {
    /// Classes from the file's own namespace keep their short name. Others
    /// are imported unless their short name is already taken, in which case
    /// they are written fully qualified.
    fn resolve(source: &'a ClassSource) -> Self {
        let own = source.name();
        let refs = source.referenced_classes();

        let mut short: HashMap<&'a str, String> = HashMap::new();
        short.insert(own.short_name(), own.fqn());
        for class in refs.iter().copied().filter(|c| c.same_namespace(own)) {
            short.entry(class.short_name()).or_insert_with(|| class.fqn());
        }

        let mut imports = BTreeSet::new();
        for class in refs.iter().copied().filter(|c| !c.same_namespace(own)) {
            if !short.contains_key(class.short_name()) {
                short.insert(class.short_name(), class.fqn());
                imports.insert(class.fqn());
            }
        }

        Self { imports, short }
    }

    fn class(&self, class: &ClassName) -> String {
        let fqn = class.fqn();
        match self.short.get(class.short_name()) {
            Some(bound) if *bound == fqn => class.short_name().to_string(),
            _ => format!("\\{fqn}"),
        }
    }

    fn type_ref(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Scalar(scalar) => scalar.to_string(),
            TypeRef::Class(class) => self.class(class),
        }
    }
}

fn class_header(source: &ClassSource, names: &Names<'_>) -> String {
    let mut header = format!("class {}", source.name().short_name());
    if let Some(parent) = source.parent() {
        let _ = write!(header, " extends {}", names.class(parent));
    }
    if !source.interfaces().is_empty() {
        let interfaces: Vec<String> = source.interfaces().iter().map(|i| names.class(i)).collect();
        let _ = write!(header, " implements {}", interfaces.join(", "));
    }
    header.push('\n');
    header
}

fn property(property: &Property, names: &Names<'_>) -> String {
    format!(
        "{INDENT}{} {} ${};\n",
        property.visibility.as_str(),
        names.type_ref(&property.type_ref),
        property.name
    )
}

fn parameter_list(parameters: &[Parameter], names: &Names<'_>) -> String {
    parameters
        .iter()
        .map(|p| format!("{} ${}", names.type_ref(p.type_ref()), p.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn constructor(parameters: &[Parameter], names: &Names<'_>) -> String {
    let mut out = format!(
        "{INDENT}public function __construct({})\n{INDENT}{{\n",
        parameter_list(parameters, names)
    );
    for parameter in parameters {
        let _ = writeln!(
            out,
            "{INDENT}{INDENT}$this->{0} = ${0};",
            parameter.name()
        );
    }
    let _ = writeln!(out, "{INDENT}}}");
    out
}

fn method(method: &Method, names: &Names<'_>) -> String {
    let mut signature = format!("{INDENT}{} ", method.visibility.as_str());
    if method.is_static {
        signature.push_str("static ");
    }
    let _ = write!(
        signature,
        "function {}({})",
        method.name,
        parameter_list(&method.parameters, names)
    );
    match &method.return_type {
        Some(ReturnType::Void) => signature.push_str(": void"),
        Some(ReturnType::Type(t)) => {
            let _ = write!(signature, ": {}", names.type_ref(t));
        }
        Some(ReturnType::Nullable(t)) => {
            let _ = write!(signature, ": ?{}", names.type_ref(t));
        }
        None => {}
    }

    let mut out = format!("{signature}\n{INDENT}{{\n");
    for line in &method.body {
        let _ = writeln!(out, "{INDENT}{INDENT}{line}");
    }
    let _ = writeln!(out, "{INDENT}}}");
    out
}
