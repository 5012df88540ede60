//! Full generation runs against a real directory.

use std::fs;
use std::path::Path;

use skel_adapters::{LocalFilesystem, MemoryFilesystem, PhpRenderer, ScriptedPrompter};
use skel_core::{
    application::{ApplicationError, FileKind},
    domain::read_model::DEFAULT_ENTITY_BASE_CLASS,
    prelude::*,
};
use tempfile::TempDir;

fn service(
    profile: Profile,
    filesystem: Box<dyn Filesystem>,
    root: &Path,
    overwrite: OverwritePolicy,
) -> ReadModelService {
    let registry = TemplateRegistry::for_profile(profile, &TemplateOptions::default()).unwrap();
    let emitter = FileEmitter::new(
        Box::new(PhpRenderer::new()),
        filesystem,
        ProjectLayout::new("src", "spec", Some("App")).unwrap(),
    )
    .with_root(root)
    .with_overwrite(overwrite);
    ReadModelService::new(profile, registry, emitter)
}

fn run(
    profile: Profile,
    root: &Path,
    overwrite: OverwritePolicy,
    prompter: &ScriptedPrompter,
) -> SkelResult<GenerationReport> {
    let session = InputService::default().collect(prompter, &InputPreset::default())?;
    service(profile, Box::new(LocalFilesystem::new()), root, overwrite).generate(&session, prompter)
}

#[test]
fn invoice_plain_read_model() {
    let dir = TempDir::new().unwrap();
    let prompter =
        ScriptedPrompter::new(["App\\Invoice", ""]).with_confirmations([false, false, false]);

    let report = run(Profile::Plain, dir.path(), OverwritePolicy::Fail, &prompter).unwrap();

    let written: Vec<_> = report
        .files
        .iter()
        .map(|f| f.path.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        written,
        [
            Path::new("src/InvoiceEntity.php"),
            Path::new("src/InvoiceRepository.php"),
            Path::new("src/InvoiceProjector.php"),
        ]
    );
    assert!(!dir.path().join("spec").exists());

    let projector = fs::read_to_string(dir.path().join("src/InvoiceProjector.php")).unwrap();
    assert!(projector.contains("namespace App;"));
    assert!(projector.contains("class InvoiceProjector extends Projector"));
    assert!(projector.contains("public function __construct(InvoiceRepository $repository)"));

    assert_eq!(
        prompter.asked(),
        [
            "Class name (without suffix)",
            "Property name (leave empty to finish)",
            "Create PHPSpec file for entity?",
            "Create PHPSpec file for repository?",
            "Create PHPSpec file for projector?",
        ]
    );
}

#[test]
fn persistence_engine_with_specs() {
    let dir = TempDir::new().unwrap();
    let prompter = ScriptedPrompter::new(["App\\ReadModel\\Order", "id", "string", "total", "int", ""]);

    let report =
        run(Profile::PersistenceEngine, dir.path(), OverwritePolicy::Fail, &prompter).unwrap();
    assert_eq!(report.class_files().count(), 4);
    assert_eq!(report.spec_files().count(), 4);

    let entity = fs::read_to_string(dir.path().join("src/ReadModel/OrderEntity.php")).unwrap();
    let base_short = DEFAULT_ENTITY_BASE_CLASS.rsplit('\\').next().unwrap();
    assert!(entity.contains(&format!("class OrderEntity extends {base_short} implements SerializableReadModel")));
    assert!(entity.contains("private int $total;"));

    let projector =
        fs::read_to_string(dir.path().join("src/ReadModel/OrderProjector.php")).unwrap();
    assert!(projector.contains(
        "__construct(OrderRepository $repository, OrderFactory $factory)"
    ));

    let spec =
        fs::read_to_string(dir.path().join("spec/ReadModel/OrderProjectorSpec.php")).unwrap();
    assert!(spec.contains("namespace spec\\App\\ReadModel;"));
    assert!(spec.contains("public function let(OrderRepository $repository, OrderFactory $factory)"));
    assert!(spec.contains("$this->beConstructedWith($repository, $factory);"));
    assert!(spec.contains("$this->shouldHaveType(OrderProjector::class);"));
}

#[test]
fn existing_file_conflicts_and_keeps_earlier_output() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/InvoiceRepository.php"), "<?php // mine\n").unwrap();

    let prompter = ScriptedPrompter::new(["App\\Invoice", ""]).with_confirmations([false]);
    let err = run(Profile::Plain, dir.path(), OverwritePolicy::Fail, &prompter).unwrap_err();

    match err {
        SkelError::Application(ApplicationError::Aborted { emitted, cause, .. }) => {
            assert_eq!(emitted, [dir.path().join("src/InvoiceEntity.php")]);
            assert!(matches!(
                *cause,
                SkelError::Application(ApplicationError::WriteConflict { .. })
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(dir.path().join("src/InvoiceEntity.php").exists());
    assert!(!dir.path().join("src/InvoiceProjector.php").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("src/InvoiceRepository.php")).unwrap(),
        "<?php // mine\n"
    );
}

#[test]
fn overwrite_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/InvoiceRepository.php"), "<?php // mine\n").unwrap();

    let prompter = ScriptedPrompter::new(["App\\Invoice", ""]).with_confirmations([false; 3]);
    let report = run(Profile::Plain, dir.path(), OverwritePolicy::Overwrite, &prompter).unwrap();

    assert_eq!(report.files.len(), 3);
    let repository = fs::read_to_string(dir.path().join("src/InvoiceRepository.php")).unwrap();
    assert!(repository.contains("class InvoiceRepository"));
}

#[test]
fn dry_run_in_memory_touches_no_disk() {
    let dir = TempDir::new().unwrap();
    let memory = MemoryFilesystem::new();
    let prompter = ScriptedPrompter::default();
    let session = InputService::default()
        .collect(
            &prompter,
            &InputPreset {
                class_name: Some("App\\Invoice".into()),
                parameters: Some(vec!["id:string".into()]),
            },
        )
        .unwrap();

    let report = service(
        Profile::Plain,
        Box::new(memory.clone()),
        dir.path(),
        OverwritePolicy::Fail,
    )
    .with_spec_policy(SpecPolicy::Always)
    .generate(&session, &prompter)
    .unwrap();

    assert_eq!(report.files.len(), 6);
    assert_eq!(
        report.files.iter().filter(|f| f.kind == FileKind::Spec).count(),
        3
    );
    assert_eq!(memory.list_files().len(), 6);
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    assert!(prompter.asked().is_empty());
}

#[test]
fn equal_descriptors_give_equal_files() {
    let registry =
        TemplateRegistry::for_profile(Profile::PersistenceEngine, &TemplateOptions::default())
            .unwrap();
    let emitter = FileEmitter::new(
        Box::new(PhpRenderer::new()),
        Box::new(MemoryFilesystem::new()),
        ProjectLayout::new("src", "spec", Some("App")).unwrap(),
    );
    let base = ReadModelName::parse("App\\Billing\\Invoice").unwrap();
    let parameters: Vec<Parameter> = ["id:string", "total:int", "issuedAt:DateTimeImmutable"]
        .iter()
        .map(|p| p.parse().unwrap())
        .collect();

    for role in Profile::PersistenceEngine.roles() {
        let class = base.class_for(*role);
        let first = registry.create(role.template_key(), &class, &parameters).unwrap();
        let second = registry.create(role.template_key(), &class, &parameters).unwrap();
        assert_eq!(first, second);

        let first_file = emitter.to_file_resource(&first).unwrap();
        let second_file = emitter.to_file_resource(&second).unwrap();
        assert_eq!(first_file, second_file);

        let first_spec = emitter
            .to_file_resource(&emitter.create_paired_spec(&first).unwrap())
            .unwrap();
        let second_spec = emitter
            .to_file_resource(&emitter.create_paired_spec(&second).unwrap())
            .unwrap();
        assert_eq!(first_spec, second_spec);
        assert_ne!(first_file.path(), first_spec.path());
    }
}
