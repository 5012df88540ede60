//! Prompter answering from a prepared script.

use std::collections::VecDeque;
use std::sync::Mutex;

use skel_core::{
    application::{ApplicationError, ports::Prompter},
    error::SkelResult,
};
use tracing::debug;

/// Answers questions in order from fixed lists.
///
/// Text questions fail once the inputs run out; confirmations fall back to
/// their default. Every question asked is recorded.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    inputs: Mutex<VecDeque<String>>,
    confirmations: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
    rejections: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: Mutex::new(inputs.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn with_confirmations(self, answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            confirmations: Mutex::new(answers.into_iter().collect()),
            ..self
        }
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }

    /// Messages passed to `notify_invalid`, in order.
    pub fn rejections(&self) -> Vec<String> {
        self.rejections.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, prompt: &str) -> SkelResult<()> {
        self.asked
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(prompt.to_string());
        Ok(())
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str) -> SkelResult<String> {
        self.record(prompt)?;
        let answer = self
            .inputs
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .pop_front();

        debug!(prompt, ?answer, "Scripted input");
        answer.ok_or_else(|| {
            ApplicationError::PromptFailed {
                prompt: prompt.to_string(),
                reason: "no scripted answer left".into(),
            }
            .into()
        })
    }

    fn confirm(&self, prompt: &str, default: bool) -> SkelResult<bool> {
        self.record(prompt)?;
        let answer = self
            .confirmations
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .pop_front()
            .unwrap_or(default);
        Ok(answer)
    }

    fn notify_invalid(&self, message: &str) {
        if let Ok(mut rejections) = self.rejections.lock() {
            rejections.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skel_core::error::SkelError;

    #[test]
    fn answers_in_order_then_fails() {
        let prompter = ScriptedPrompter::new(["Order", ""]);
        assert_eq!(prompter.input("a").unwrap(), "Order");
        assert_eq!(prompter.input("b").unwrap(), "");
        assert!(matches!(
            prompter.input("c"),
            Err(SkelError::Application(ApplicationError::PromptFailed { .. }))
        ));
        assert_eq!(prompter.asked(), ["a", "b", "c"]);
    }

    #[test]
    fn confirmations_fall_back_to_default() {
        let prompter = ScriptedPrompter::default().with_confirmations([false]);
        assert!(!prompter.confirm("first", true).unwrap());
        assert!(prompter.confirm("second", true).unwrap());
    }
}
