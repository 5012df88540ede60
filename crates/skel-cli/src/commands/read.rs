//! Implementation of `skel read` and `skel read-orm`.
//!
//! Responsibility: turn flags and config into an input preset and a wired
//! `ReadModelService`, run it, and display the report. No generation logic
//! lives here.

use serde::Serialize;
use tracing::{debug, info, instrument};

use skel_adapters::{LocalFilesystem, MemoryFilesystem, PhpRenderer};
use skel_core::{
    application::{
        FileEmitter, FileKind, GenerationReport, InputPreset, InputService, ReadModelService,
        TemplateRegistry, ports::Filesystem,
    },
    domain::{OverwritePolicy, Profile, SpecPolicy},
};

use crate::{
    cli::{GlobalArgs, ReadArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

/// Execute `skel read` (plain profile) or `skel read-orm`.
///
/// Dispatch sequence:
/// 1. Print the introduction
/// 2. Collect the class name and properties (flags first, then prompts)
/// 3. Wire renderer, filesystem and templates for the profile
/// 4. Generate, asking about spec files per role
/// 5. Report what was written
#[instrument(skip_all, fields(profile = %profile))]
pub fn execute(
    args: ReadArgs,
    profile: Profile,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    if !output.is_json() {
        introduce(profile, &output)?;
    }

    // 2. Input
    let preset = preset_from(&args)?;
    let prompter = prompt::for_session(args.no_interaction, output.supports_color());
    let session = InputService::new(config.generation.max_attempts)
        .collect(prompter.as_ref(), &preset)?;
    debug!(
        class_name = %session.base_name,
        parameters = session.parameters.len(),
        "Input collected"
    );

    // 3. Wiring
    let memory = args.dry_run.then(MemoryFilesystem::new);
    let filesystem: Box<dyn Filesystem> = match &memory {
        Some(memory) => Box::new(memory.clone()),
        None => Box::new(LocalFilesystem::new()),
    };
    let service = build_service(profile, &args, &config, filesystem)?;

    // 4. Generation
    info!(class_name = %session.base_name, dry_run = args.dry_run, "Generation started");
    let report = service.generate(&session, prompter.as_ref())?;
    info!(files = report.files.len(), "Generation completed");

    // 5. Report
    if output.is_json() {
        output.json(&ReadOutput {
            dry_run: args.dry_run,
            report: &report,
        })?;
        return Ok(());
    }
    show_report(&report, memory.as_ref(), global.verbose > 0, &output)
}

#[derive(Serialize)]
struct ReadOutput<'a> {
    dry_run: bool,
    #[serde(flatten)]
    report: &'a GenerationReport,
}

fn introduce(profile: Profile, output: &OutputManager) -> CliResult<()> {
    let title = match profile {
        Profile::Plain => "Broadway read model generator",
        Profile::PersistenceEngine => "Broadway read model generator (persistence engine)",
    };
    output.header(title)?;
    output.print("This command helps you generate a Broadway read model.")?;
    output.print("First, give the class name of the read model you want to generate.")?;
    output.warning("Do not add suffixes: Entity, Repository, Factory and Projector are appended.")?;
    output.print("")?;
    Ok(())
}

/// Flags that pre-answer questions.
///
/// With `--no-interaction` the class name is mandatory and an empty
/// property list is assumed.
fn preset_from(args: &ReadArgs) -> CliResult<InputPreset> {
    if args.no_interaction && args.class_name.is_none() {
        return Err(CliError::InvalidInput {
            message: "--class-name is required with --no-interaction".into(),
            source: None,
        });
    }

    let parameters = if !args.params.is_empty() {
        Some(args.params.clone())
    } else if args.no_interaction {
        Some(Vec::new())
    } else {
        None
    };

    Ok(InputPreset {
        class_name: args.class_name.clone(),
        parameters,
    })
}

fn build_service(
    profile: Profile,
    args: &ReadArgs,
    config: &AppConfig,
    filesystem: Box<dyn Filesystem>,
) -> CliResult<ReadModelService> {
    let registry = TemplateRegistry::for_profile(profile, &config.template_options()?)?;

    let overwrite = if args.force {
        OverwritePolicy::Overwrite
    } else {
        config.overwrite_policy()
    };
    let emitter = FileEmitter::new(
        Box::new(PhpRenderer::new()),
        filesystem,
        config.project_layout()?,
    )
    .with_root(args.root.clone().unwrap_or_default())
    .with_overwrite(overwrite);

    let spec_policy: SpecPolicy = args
        .specs
        .map(SpecPolicy::from)
        .unwrap_or(config.generation.specs);

    Ok(ReadModelService::new(profile, registry, emitter).with_spec_policy(spec_policy))
}

fn show_report(
    report: &GenerationReport,
    memory: Option<&MemoryFilesystem>,
    show_contents: bool,
    output: &OutputManager,
) -> CliResult<()> {
    for file in &report.files {
        let label = match file.kind {
            FileKind::Class => file.class_name.clone(),
            FileKind::Spec => format!("{} (spec)", file.class_name),
        };
        match memory {
            Some(memory) => {
                output.info(&format!("Would create {}", file.path.display()))?;
                output.detail(&label)?;
                if show_contents {
                    if let Some(content) = memory.read_file(&file.path) {
                        output.print(&content)?;
                    }
                }
            }
            None => {
                output.success(&format!("Created {}", file.path.display()))?;
                output.detail(&label)?;
            }
        }
    }

    output.print("")?;
    let summary = format!(
        "Read model {}: {} class file(s), {} spec file(s)",
        report.class_name,
        report.class_files().count(),
        report.spec_files().count(),
    );
    if memory.is_some() {
        output.info(&format!("Dry run, nothing written. {summary}"))?;
    } else {
        output.success(&summary)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn read_args(argv: &[&str]) -> ReadArgs {
        let mut full = vec!["skel", "read"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Read(args) => args,
            other => panic!("expected Read, got {other:?}"),
        }
    }

    #[test]
    fn no_interaction_requires_class_name() {
        let err = preset_from(&read_args(&["--no-interaction"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn no_interaction_assumes_no_properties() {
        let preset = preset_from(&read_args(&["-n", "--class-name", "Invoice"])).unwrap();
        assert_eq!(preset.class_name.as_deref(), Some("Invoice"));
        assert_eq!(preset.parameters, Some(Vec::new()));
    }

    #[test]
    fn interactive_run_without_params_asks_for_them() {
        let preset = preset_from(&read_args(&["--class-name", "Invoice"])).unwrap();
        assert_eq!(preset.parameters, None);

        let preset = preset_from(&read_args(&["-p", "id:string"])).unwrap();
        assert_eq!(preset.class_name, None);
        assert_eq!(preset.parameters, Some(vec!["id:string".to_string()]));
    }

    fn run_with(
        argv: &[&str],
        config: &AppConfig,
        memory: &MemoryFilesystem,
    ) -> CliResult<GenerationReport> {
        let args = read_args(argv);
        let service = build_service(Profile::Plain, &args, config, Box::new(memory.clone()))?;
        let session = InputService::default()
            .collect(&prompt::NonInteractivePrompter, &preset_from(&args)?)?;
        Ok(service.generate(&session, &prompt::NonInteractivePrompter)?)
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.generation.specs = SpecPolicy::Never;
        config.generation.overwrite = false;

        let existing = std::path::Path::new("out/src/InvoiceEntity.php");
        let memory = MemoryFilesystem::new().with_file(existing, "<?php // old\n");
        let report = run_with(
            &["-n", "--class-name", "Invoice", "--specs", "always", "--force", "--root", "out"],
            &config,
            &memory,
        )
        .unwrap();

        assert_eq!(report.spec_files().count(), 3);
        assert!(report.files.iter().all(|f| f.path.starts_with("out")));
        assert!(memory.read_file(existing).unwrap().contains("class InvoiceEntity"));
    }

    #[test]
    fn config_applies_without_flags() {
        let mut config = AppConfig::default();
        config.generation.specs = SpecPolicy::Never;

        let memory = MemoryFilesystem::new();
        let report = run_with(&["-n", "--class-name", "Invoice"], &config, &memory).unwrap();
        assert_eq!(report.spec_files().count(), 0);
        assert!(report.files.iter().all(|f| f.path.starts_with("src")));

        let err = run_with(&["-n", "--class-name", "Invoice"], &config, &memory).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn dry_run_generates_into_memory() {
        let args = read_args(&["-n", "--class-name", "App\\Invoice", "--dry-run"]);
        let memory = MemoryFilesystem::new();
        let service = build_service(
            Profile::PersistenceEngine,
            &args,
            &AppConfig::default(),
            Box::new(memory.clone()),
        )
        .unwrap();
        let session = InputService::default()
            .collect(&prompt::NonInteractivePrompter, &preset_from(&args).unwrap())
            .unwrap();

        let report = service
            .generate(&session, &prompt::NonInteractivePrompter)
            .unwrap();

        assert_eq!(report.class_files().count(), 4);
        assert_eq!(report.spec_files().count(), 4);
        assert_eq!(memory.list_files().len(), 8);
        assert!(
            memory
                .read_file(std::path::Path::new("src/App/InvoiceFactory.php"))
                .is_some()
        );
    }
}
