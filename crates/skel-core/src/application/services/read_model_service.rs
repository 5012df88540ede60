//! Read-model generation - the main application orchestrator.
//!
//! For every role of the profile, in order:
//! 1. Build the descriptor through the template registry
//! 2. Render and write it
//! 3. Depending on the spec policy, ask and write its phpspec file
//!
//! There is no rollback. A failure stops the run and the files written so
//! far stay where they are; the error lists them.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::Prompter,
        services::{FileEmitter, GenerationSession, TemplateRegistry},
    },
    domain::{ClassSource, Parameter, Profile, ReadModelName, Role, SpecPolicy},
    error::{SkelError, SkelResult},
};

/// Where a run is, or stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "role", rename_all = "kebab-case")]
pub enum GenerationStage {
    CollectingInput,
    Generating(Role),
    AskingSpec(Role),
    Done,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Class,
    Spec,
}

/// One written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedFile {
    pub role: Role,
    pub kind: FileKind,
    pub class_name: String,
    pub path: PathBuf,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub profile: Profile,
    pub class_name: ReadModelName,
    pub files: Vec<EmittedFile>,
    pub stages: Vec<GenerationStage>,
}

impl GenerationReport {
    pub fn class_files(&self) -> impl Iterator<Item = &EmittedFile> {
        self.files.iter().filter(|f| f.kind == FileKind::Class)
    }

    pub fn spec_files(&self) -> impl Iterator<Item = &EmittedFile> {
        self.files.iter().filter(|f| f.kind == FileKind::Spec)
    }
}

/// Confirmation shown before writing a role's spec file.
pub fn spec_question(role: Role) -> String {
    format!("Create PHPSpec file for {role}?")
}

/// Generates every class of one read model.
pub struct ReadModelService {
    profile: Profile,
    registry: TemplateRegistry,
    emitter: FileEmitter,
    spec_policy: SpecPolicy,
}

impl ReadModelService {
    pub fn new(profile: Profile, registry: TemplateRegistry, emitter: FileEmitter) -> Self {
        Self {
            profile,
            registry,
            emitter,
            spec_policy: SpecPolicy::default(),
        }
    }

    pub fn with_spec_policy(mut self, spec_policy: SpecPolicy) -> Self {
        self.spec_policy = spec_policy;
        self
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Generate the read model described by `session`.
    ///
    /// `prompter` is only consulted under [`SpecPolicy::Ask`].
    #[instrument(
        skip_all,
        fields(profile = %self.profile, class = %session.base_name)
    )]
    pub fn generate(
        &self,
        session: &GenerationSession,
        prompter: &dyn Prompter,
    ) -> SkelResult<GenerationReport> {
        info!(
            "Generating {} read model {}",
            self.profile, session.base_name
        );

        let mut report = GenerationReport {
            profile: self.profile,
            class_name: session.base_name.clone(),
            files: Vec::new(),
            stages: vec![GenerationStage::CollectingInput],
        };

        for &role in self.profile.roles() {
            if let Err(cause) = self.generate_role(role, session, prompter, &mut report) {
                report.stages.push(GenerationStage::Aborted);
                warn!(
                    role = %role,
                    written = report.files.len(),
                    error = %cause,
                    "Generation aborted, keeping files already written"
                );
                return Err(ApplicationError::Aborted {
                    class_name: session.base_name.to_string(),
                    emitted: report.files.into_iter().map(|f| f.path).collect(),
                    cause: Box::new(cause),
                }
                .into());
            }
        }

        report.stages.push(GenerationStage::Done);
        info!(files = report.files.len(), "Read model generated");
        Ok(report)
    }

    fn generate_role(
        &self,
        role: Role,
        session: &GenerationSession,
        prompter: &dyn Prompter,
        report: &mut GenerationReport,
    ) -> Result<(), SkelError> {
        report.stages.push(GenerationStage::Generating(role));

        let class_name = session.base_name.class_for(role);
        let parameters = self.parameters_for(role, session)?;
        let source = self
            .registry
            .create(role.template_key(), &class_name, &parameters)?;
        self.write(role, FileKind::Class, &source, report)?;

        if self.wants_spec(role, prompter, report)? {
            let spec = self.emitter.create_paired_spec(&source)?;
            self.write(role, FileKind::Spec, &spec, report)?;
        }
        Ok(())
    }

    /// Constructor parameters handed to the template of `role`.
    ///
    /// Only the projector references other roles: its repository, then
    /// (when the profile has one) its factory.
    fn parameters_for(
        &self,
        role: Role,
        session: &GenerationSession,
    ) -> SkelResult<Vec<Parameter>> {
        match role {
            Role::Entity => Ok(session.parameters.clone()),
            Role::Repository | Role::Factory => Ok(Vec::new()),
            Role::Projector => {
                let mut collaborators = vec![Parameter::new(
                    "repository",
                    session.base_name.class_for(Role::Repository),
                )?];
                if self.profile.roles().contains(&Role::Factory) {
                    collaborators.push(Parameter::new(
                        "factory",
                        session.base_name.class_for(Role::Factory),
                    )?);
                }
                Ok(collaborators)
            }
        }
    }

    fn wants_spec(
        &self,
        role: Role,
        prompter: &dyn Prompter,
        report: &mut GenerationReport,
    ) -> SkelResult<bool> {
        match self.spec_policy {
            SpecPolicy::Always => Ok(true),
            SpecPolicy::Never => Ok(false),
            SpecPolicy::Ask => {
                report.stages.push(GenerationStage::AskingSpec(role));
                prompter.confirm(&spec_question(role), true)
            }
        }
    }

    fn write(
        &self,
        role: Role,
        kind: FileKind,
        source: &ClassSource,
        report: &mut GenerationReport,
    ) -> SkelResult<()> {
        let resource = self.emitter.to_file_resource(source)?;
        let path = self.emitter.emit(&resource)?;
        report.files.push(EmittedFile {
            role,
            kind,
            class_name: source.name().fqn(),
            path,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ports::{MockFilesystem, MockPrompter, MockSourceRenderer},
        services::TemplateOptions,
    };
    use crate::domain::{ClassName, ProjectLayout, TypeRef};
    use std::sync::{Arc, Mutex};

    type Written = Arc<Mutex<Vec<PathBuf>>>;

    fn emitter(written: Written, fail_on: Option<&'static str>) -> FileEmitter {
        let mut renderer = MockSourceRenderer::new();
        renderer
            .expect_render()
            .returning(|source| Ok(source.name().fqn()));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().returning(move |path, _, _| {
            if fail_on.is_some_and(|f| path.ends_with(f)) {
                return Err(ApplicationError::IoFailure {
                    path: path.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into());
            }
            written.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });

        FileEmitter::new(Box::new(renderer), Box::new(fs), ProjectLayout::default())
    }

    fn service(profile: Profile, written: Written, fail_on: Option<&'static str>) -> ReadModelService {
        let registry = TemplateRegistry::for_profile(profile, &TemplateOptions::default()).unwrap();
        ReadModelService::new(profile, registry, emitter(written, fail_on))
    }

    fn session(name: &str) -> GenerationSession {
        GenerationSession {
            base_name: ReadModelName::parse(name).unwrap(),
            parameters: Vec::new(),
        }
    }

    fn answering(answer: bool) -> MockPrompter {
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().returning(move |_, _| Ok(answer));
        prompter
    }

    #[test]
    fn invoice_without_specs_writes_three_classes_in_order() {
        let written = Written::default();
        let report = service(Profile::Plain, written.clone(), None)
            .generate(&session("Invoice"), &answering(false))
            .unwrap();

        let names: Vec<&str> = report.files.iter().map(|f| f.class_name.as_str()).collect();
        assert_eq!(names, ["InvoiceEntity", "InvoiceRepository", "InvoiceProjector"]);
        assert_eq!(report.spec_files().count(), 0);
        assert_eq!(
            *written.lock().unwrap(),
            [
                PathBuf::from("src/InvoiceEntity.php"),
                PathBuf::from("src/InvoiceRepository.php"),
                PathBuf::from("src/InvoiceProjector.php"),
            ]
        );
        assert_eq!(report.stages.first(), Some(&GenerationStage::CollectingInput));
        assert_eq!(report.stages.last(), Some(&GenerationStage::Done));
    }

    #[test]
    fn projector_references_repository_and_factory() {
        let orm = service(Profile::PersistenceEngine, Written::default(), None);
        let params = orm
            .parameters_for(Role::Projector, &session("Order"))
            .unwrap();
        let types: Vec<&TypeRef> = params.iter().map(|p| p.type_ref()).collect();
        assert_eq!(
            types,
            [
                &TypeRef::Class(ClassName::parse("OrderRepository").unwrap()),
                &TypeRef::Class(ClassName::parse("OrderFactory").unwrap()),
            ]
        );

        let plain = service(Profile::Plain, Written::default(), None);
        let params = plain
            .parameters_for(Role::Projector, &session("Invoice"))
            .unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].to_string(), "repository:InvoiceRepository");
    }

    #[test]
    fn accepted_specs_follow_their_class() {
        let written = Written::default();
        let report = service(Profile::PersistenceEngine, written.clone(), None)
            .generate(&session("Order"), &answering(true))
            .unwrap();

        assert_eq!(report.files.len(), 8);
        assert_eq!(report.files[0].kind, FileKind::Class);
        assert_eq!(report.files[1].kind, FileKind::Spec);
        assert_eq!(report.files[1].path, PathBuf::from("spec/OrderEntitySpec.php"));
        assert_eq!(report.files[4].class_name, "OrderFactory");
        assert_eq!(
            report.stages[1..4],
            [
                GenerationStage::Generating(Role::Entity),
                GenerationStage::AskingSpec(Role::Entity),
                GenerationStage::Generating(Role::Repository),
            ]
        );
    }

    #[test]
    fn never_policy_skips_the_question() {
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().never();

        let report = service(Profile::Plain, Written::default(), None)
            .with_spec_policy(SpecPolicy::Never)
            .generate(&session("Invoice"), &prompter)
            .unwrap();
        assert_eq!(report.files.len(), 3);
        assert!(
            !report
                .stages
                .iter()
                .any(|s| matches!(s, GenerationStage::AskingSpec(_)))
        );
    }

    #[test]
    fn spec_question_names_the_role() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .withf(|prompt, default| prompt.starts_with("Create PHPSpec file for") && *default)
            .times(3)
            .returning(|_, _| Ok(false));

        service(Profile::Plain, Written::default(), None)
            .generate(&session("Invoice"), &prompter)
            .unwrap();
        assert_eq!(spec_question(Role::Entity), "Create PHPSpec file for entity?");
    }

    #[test]
    fn failure_aborts_and_keeps_earlier_files() {
        let written = Written::default();
        let err = service(Profile::Plain, written.clone(), Some("InvoiceProjector.php"))
            .generate(&session("Invoice"), &answering(false))
            .unwrap_err();

        match err {
            SkelError::Application(ApplicationError::Aborted {
                class_name,
                emitted,
                cause,
            }) => {
                assert_eq!(class_name, "Invoice");
                assert_eq!(emitted.len(), 2);
                assert!(matches!(
                    *cause,
                    SkelError::Application(ApplicationError::IoFailure { .. })
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(written.lock().unwrap().len(), 2);
    }
}
