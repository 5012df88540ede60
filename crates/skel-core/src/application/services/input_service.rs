//! Input collection - class name and constructor parameters.
//!
//! Every question is asked through the `Prompter` port and re-asked while
//! the answer is invalid, up to `max_attempts` times.

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Prompter},
    domain::{DomainError, DomainValidator as validator, Parameter, ReadModelName, TypeRef},
    error::SkelResult,
};

pub const CLASS_NAME_PROMPT: &str = "Class name (without suffix)";
pub const PARAMETER_NAME_PROMPT: &str = "Property name (leave empty to finish)";

/// Attempts per question unless configured otherwise.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// What the user already supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputPreset {
    pub class_name: Option<String>,
    /// `Some` skips the property loop entirely, even when empty.
    pub parameters: Option<Vec<String>>,
}

/// Everything one generation run needs from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSession {
    pub base_name: ReadModelName,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Copy)]
pub struct InputService {
    max_attempts: usize,
}

impl Default for InputService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl InputService {
    /// `max_attempts` below one is treated as one.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Collect a session, asking only for what `preset` leaves open.
    #[instrument(skip_all)]
    pub fn collect(
        &self,
        prompter: &dyn Prompter,
        preset: &InputPreset,
    ) -> SkelResult<GenerationSession> {
        let base_name = match &preset.class_name {
            Some(raw) => ReadModelName::parse(raw.trim())
                .map_err(|e| rejected_preset("--class-name", e))?,
            None => self.ask_until_valid(prompter, CLASS_NAME_PROMPT, ReadModelName::parse)?,
        };

        let parameters = match &preset.parameters {
            Some(raw) => {
                let parameters = raw
                    .iter()
                    .map(|p| p.parse::<Parameter>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| rejected_preset("--param", e))?;
                validator::validate_parameters(&parameters)
                    .map_err(|e| rejected_preset("--param", e))?;
                parameters
            }
            None => self.ask_parameters(prompter)?,
        };

        debug!(class = %base_name, params = parameters.len(), "Input collected");
        Ok(GenerationSession {
            base_name,
            parameters,
        })
    }

    /// Ask `prompt` until `parse` accepts the trimmed answer.
    pub fn ask_until_valid<T, F>(
        &self,
        prompter: &dyn Prompter,
        prompt: &str,
        mut parse: F,
    ) -> SkelResult<T>
    where
        F: FnMut(&str) -> Result<T, DomainError>,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            let answer = prompter.input(prompt)?;
            match parse(answer.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(prompt, attempt, error = %e, "Rejected answer");
                    prompter.notify_invalid(&e.to_string());
                    last_error = Some(e);
                }
            }
        }

        Err(ApplicationError::InvalidUserInput {
            prompt: prompt.to_string(),
            attempts: self.max_attempts,
            reason: last_error.map(|e| e.to_string()).unwrap_or_default(),
        }
        .into())
    }

    fn ask_parameters(&self, prompter: &dyn Prompter) -> SkelResult<Vec<Parameter>> {
        let mut parameters: Vec<Parameter> = Vec::new();

        loop {
            let name = self.ask_until_valid(prompter, PARAMETER_NAME_PROMPT, |answer| {
                if answer.is_empty() {
                    return Ok(None);
                }
                let name = Parameter::parse_name(answer)?;
                validator::validate_new_parameter(&parameters, &name)?;
                Ok(Some(name))
            })?;

            let Some(name) = name else { break };

            let type_prompt = format!("Type of ${name}");
            let type_ref =
                self.ask_until_valid(prompter, &type_prompt, |answer| answer.parse::<TypeRef>())?;
            parameters.push(Parameter::new(&name, type_ref)?);
        }

        Ok(parameters)
    }
}

fn rejected_preset(option: &str, error: DomainError) -> crate::error::SkelError {
    ApplicationError::InvalidUserInput {
        prompt: option.to_string(),
        attempts: 1,
        reason: error.to_string(),
    }
    .into()
}
