//! Implementation of the `skel templates` command.

use serde::Serialize;
use skel_core::{
    application::TemplateRegistry,
    domain::{Profile, Role},
};
use tracing::instrument;

use crate::{
    cli::{ListFormat, TemplatesArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// One registered template, as listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateRow {
    pub profile: Profile,
    pub key: &'static str,
    pub role: Role,
    /// Generated class for a base name `<Name>`.
    pub class: String,
}

#[instrument(skip_all)]
pub fn execute(args: TemplatesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let profiles: Vec<Profile> = match args.profile {
        Some(choice) => vec![choice.into()],
        None => Profile::ALL.to_vec(),
    };
    let rows = collect_rows(&profiles, &config)?;

    if output.is_json() {
        output.json(&rows)?;
        return Ok(());
    }

    match args.format {
        ListFormat::Table => {
            for profile in &profiles {
                output.header(&format!("{profile}:"))?;
                for row in rows.iter().filter(|r| r.profile == *profile) {
                    output.print(&format!("  {:<16} {:<11} {}", row.key, row.role.as_str(), row.class))?;
                }
            }
        }
        ListFormat::List => {
            for row in &rows {
                output.print(&format!("{} {}", row.profile, row.key))?;
            }
        }
        ListFormat::Json => output.json(&rows)?,
    }

    Ok(())
}

/// Rows in emission order, read from each profile's registry.
fn collect_rows(profiles: &[Profile], config: &AppConfig) -> CliResult<Vec<TemplateRow>> {
    let options = config.template_options()?;
    let mut rows = Vec::new();
    for &profile in profiles {
        let registry = TemplateRegistry::for_profile(profile, &options)?;
        rows.extend(
            profile
                .roles()
                .iter()
                .filter(|role| registry.contains(role.template_key()))
                .map(|&role| TemplateRow {
                    profile,
                    key: role.template_key(),
                    role,
                    class: format!("<Name>{}", role.suffix()),
                }),
        );
    }
    Ok(rows)
}
