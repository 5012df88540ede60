//! Terminal implementations of the core `Prompter` port.
//!
//! Questions and validation messages go to stderr so stdout stays usable
//! for `--output-format json`.

use std::cell::RefCell;
use std::io::{self, BufRead, Write as _};

use owo_colors::OwoColorize;
use skel_core::{application::ApplicationError, application::ports::Prompter, error::SkelResult};
use tracing::debug;

/// Pick the prompter for this run.
///
/// Dialoguer needs a real terminal; piped stdin falls back to reading
/// plain lines.
pub fn for_session(no_interaction: bool, color: bool) -> Box<dyn Prompter> {
    if no_interaction {
        debug!("Using non-interactive prompter");
        return Box::new(NonInteractivePrompter);
    }
    if let Some(prompter) = terminal_prompter() {
        debug!("Using dialoguer prompter");
        return prompter;
    }
    debug!("Using line prompter");
    Box::new(LinePrompter::new(io::stdin().lock(), color))
}

#[cfg(feature = "interactive")]
fn terminal_prompter() -> Option<Box<dyn Prompter>> {
    use std::io::IsTerminal as _;

    (io::stdin().is_terminal() && io::stderr().is_terminal())
        .then(|| Box::new(TerminalPrompter::new()) as Box<dyn Prompter>)
}

#[cfg(not(feature = "interactive"))]
fn terminal_prompter() -> Option<Box<dyn Prompter>> {
    None
}

fn prompt_failed(prompt: &str, reason: impl ToString) -> ApplicationError {
    ApplicationError::PromptFailed {
        prompt: prompt.to_string(),
        reason: reason.to_string(),
    }
}

// ── dialoguer ─────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
#[derive(Default)]
pub struct TerminalPrompter {
    theme: dialoguer::theme::ColorfulTheme,
}

#[cfg(feature = "interactive")]
impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "interactive")]
impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str) -> SkelResult<String> {
        dialoguer::Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| prompt_failed(prompt, e).into())
    }

    fn confirm(&self, prompt: &str, default: bool) -> SkelResult<bool> {
        dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| prompt_failed(prompt, e).into())
    }

    fn notify_invalid(&self, message: &str) {
        let _ = console::Term::stderr().write_line(&format!("{} {}", "✗".red(), message.red()));
    }
}

// ── plain lines ───────────────────────────────────────────────────────────────

/// Reads one answer per line. End of input counts as an empty answer.
pub struct LinePrompter<R> {
    reader: RefCell<R>,
    color: bool,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(reader: R, color: bool) -> Self {
        Self {
            reader: RefCell::new(reader),
            color,
        }
    }

    fn ask(&self, question: &str) -> SkelResult<String> {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{question} ");
        let _ = stderr.flush();

        let mut line = String::new();
        self.reader
            .borrow_mut()
            .read_line(&mut line)
            .map_err(|e| prompt_failed(question, e))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn input(&self, prompt: &str) -> SkelResult<String> {
        self.ask(&format!("{prompt}:"))
    }

    fn confirm(&self, prompt: &str, default: bool) -> SkelResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(&format!("{prompt} {hint}"))?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.notify_invalid("Please answer yes or no"),
            }
        }
    }

    fn notify_invalid(&self, message: &str) {
        if self.color {
            eprintln!("{} {}", "✗".red(), message.red());
        } else {
            eprintln!("✗ {message}");
        }
    }
}

// ── --no-interaction ──────────────────────────────────────────────────────────

/// Answers confirmations with their default and refuses free-text input.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn input(&self, prompt: &str) -> SkelResult<String> {
        Err(prompt_failed(prompt, "no interaction allowed (--no-interaction)").into())
    }

    fn confirm(&self, _prompt: &str, default: bool) -> SkelResult<bool> {
        Ok(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skel_core::error::SkelError;
    use std::io::Cursor;

    fn lines(input: &str) -> LinePrompter<Cursor<Vec<u8>>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), false)
    }

    #[test]
    fn line_prompter_reads_answers_in_order() {
        let prompter = lines("App\\Invoice\r\nid\n");
        assert_eq!(prompter.input("Class name").unwrap(), "App\\Invoice");
        assert_eq!(prompter.input("Property").unwrap(), "id");
    }

    #[test]
    fn end_of_input_is_an_empty_answer() {
        let prompter = lines("");
        assert_eq!(prompter.input("Property").unwrap(), "");
        assert!(prompter.confirm("Create?", true).unwrap());
    }

    #[test]
    fn confirm_understands_yes_and_no() {
        let prompter = lines("n\nYES\n\n");
        assert!(!prompter.confirm("a?", true).unwrap());
        assert!(prompter.confirm("b?", false).unwrap());
        assert!(!prompter.confirm("c?", false).unwrap());
    }

    #[test]
    fn confirm_asks_again_on_garbage() {
        let prompter = lines("maybe\ny\n");
        assert!(prompter.confirm("a?", false).unwrap());
    }

    #[test]
    fn non_interactive_takes_defaults_and_refuses_input() {
        let prompter = NonInteractivePrompter;
        assert!(prompter.confirm("Create PHPSpec file for entity?", true).unwrap());
        assert!(!prompter.confirm("x?", false).unwrap());
        assert!(matches!(
            prompter.input("Class name (without suffix)"),
            Err(SkelError::Application(ApplicationError::PromptFailed { .. }))
        ));
    }

    #[test]
    fn no_interaction_flag_selects_non_interactive() {
        let prompter = for_session(true, false);
        assert!(prompter.confirm("x?", true).unwrap());
        assert!(prompter.input("y").is_err());
    }
}
