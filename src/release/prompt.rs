//! Interactive yes/no confirmation

use std::io::{BufRead, Write};

/// Source of the yes/no answer before an irreversible step
pub trait ConfirmationPrompt {
    /// Ask `question`; `Ok(true)` only on an explicit yes
    fn confirm(&mut self, question: &str) -> std::io::Result<bool>;
}

/// Prompt on the terminal (stdin/stdout)
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl ConfirmationPrompt for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        prompt_confirmation(&mut stdin.lock(), &mut stdout, question)
    }
}

/// Prompt over arbitrary streams
pub struct StreamPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamPrompt<R, W> {
    /// Read answers from `input`, write questions to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Recover the output stream
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> ConfirmationPrompt for StreamPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        prompt_confirmation(&mut self.input, &mut self.output, question)
    }
}

/// Prompt user for confirmation with y/n input. Empty input and EOF mean no.
pub fn prompt_confirmation<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> std::io::Result<bool> {
    write!(output, "{question} [y/N]: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let response = answer.trim().to_lowercase();
    Ok(matches!(response.as_str(), "y" | "yes"))
}
