//! Interactive console I/O.
//!
//! Orchestrators talk to the user only through [`Console`], so the same stage
//! code drives a real terminal ([`TermConsole`]) and scripted tests.

use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

use colored::Colorize;

use crate::error::{ConsoleError, Halt};

/// Printed when input ends or the user interrupts a prompt.
pub const CANCELLED_BY_USER: &str = "\n\nOperation cancelled by user.";

/// Presentation hint for a line of output. Terminals may color it; the text
/// itself never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Section banners such as `--- Creating the commit ---`.
    Banner,
    Success,
    Warning,
    Failure,
}

pub trait Console {
    /// Write one line to standard output.
    fn emit(&mut self, tone: Tone, line: &str) -> Result<(), ConsoleError>;

    /// Write one line to standard error.
    fn emit_err(&mut self, line: &str) -> Result<(), ConsoleError>;

    /// Show `prompt` (no newline appended) and read one line.
    ///
    /// Returns `Ok(None)` at end of input. The trailing line terminator is
    /// removed; other whitespace is left for the caller.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError>;

    fn say(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.emit(Tone::Plain, line)
    }

    /// Prints `\n--- title ---`.
    fn banner(&mut self, title: &str) -> Result<(), ConsoleError> {
        self.emit(Tone::Banner, &format!("\n--- {title} ---"))
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn emit(&mut self, tone: Tone, line: &str) -> Result<(), ConsoleError> {
        (**self).emit(tone, line)
    }

    fn emit_err(&mut self, line: &str) -> Result<(), ConsoleError> {
        (**self).emit_err(line)
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        (**self).read_line(prompt)
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// Read a line, trimmed. End of input becomes [`Halt::Interrupted`].
pub fn ask(console: &mut dyn Console, prompt: &str) -> Result<String, Halt> {
    match console.read_line(prompt)? {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(Halt::Interrupted),
    }
}

/// Yes/no question shown as `"<question> [y/N]: "`.
///
/// `y` means yes; `n` or an empty answer means no (case-insensitive). Any
/// other answer reprompts until one of those is given.
pub fn confirm(console: &mut dyn Console, question: &str) -> Result<bool, Halt> {
    let prompt = format!("{question} [y/N]: ");
    loop {
        let answer = ask(console, &prompt)?.to_lowercase();
        match answer.as_str() {
            "y" => return Ok(true),
            "n" | "" => return Ok(false),
            _ => console.emit(
                Tone::Warning,
                "Invalid answer. Please answer 'y' for yes or 'n' for no.",
            )?,
        }
    }
}

// ---------------------------------------------------------------------------
// TermConsole
// ---------------------------------------------------------------------------

/// [`Console`] over arbitrary reader/writers. [`TermConsole::stdio`] binds it
/// to the process streams.
pub struct TermConsole<R, W, E> {
    input: R,
    out: W,
    err: E,
    color: bool,
}

impl TermConsole<StdinLock<'static>, Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> TermConsole<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self {
            input,
            out,
            err,
            color: true,
        }
    }

    /// Disable tone coloring regardless of terminal detection.
    pub fn plain(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.out, self.err)
    }

    fn paint(&self, tone: Tone, line: &str) -> String {
        if !self.color {
            return line.to_string();
        }
        match tone {
            Tone::Plain => line.to_string(),
            Tone::Banner => line.bold().to_string(),
            Tone::Success => line.green().to_string(),
            Tone::Warning => line.yellow().to_string(),
            Tone::Failure => line.red().to_string(),
        }
    }
}

impl<R: BufRead, W: Write, E: Write> Console for TermConsole<R, W, E> {
    fn emit(&mut self, tone: Tone, line: &str) -> Result<(), ConsoleError> {
        let painted = self.paint(tone, line);
        writeln!(self.out, "{painted}")?;
        self.out.flush()?;
        Ok(())
    }

    fn emit_err(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.out.flush()?;
        writeln!(self.err, "{line}")?;
        self.err.flush()?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let line = buf.strip_suffix('\n').unwrap_or(&buf);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    type Buffered = TermConsole<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>>;

    fn console(input: &str) -> Buffered {
        TermConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Vec::new()).plain()
    }

    fn stdout_of(console: Buffered) -> String {
        let (_, out, _) = console.into_parts();
        String::from_utf8(out).expect("utf8")
    }

    #[rstest]
    #[case("y\n", true)]
    #[case("Y\n", true)]
    #[case("  y  \n", true)]
    #[case("n\n", false)]
    #[case("N\n", false)]
    #[case("\n", false)]
    #[case("   \n", false)]
    fn confirm_accepts_the_three_answers(#[case] input: &str, #[case] expected: bool) {
        let mut c = console(input);
        assert_eq!(confirm(&mut c, "Proceed?").expect("answer"), expected);
    }

    #[test]
    fn confirm_reprompts_until_valid_answer() {
        let mut c = console("yes\nmaybe\nno\ny\n");
        assert!(confirm(&mut c, "Proceed?").expect("answer"));
        let out = stdout_of(c);
        assert_eq!(out.matches("Proceed? [y/N]: ").count(), 4);
        assert_eq!(out.matches("Invalid answer").count(), 3);
    }

    #[test]
    fn confirm_at_end_of_input_is_interrupted() {
        let mut c = console("what\n");
        let err = confirm(&mut c, "Proceed?").unwrap_err();
        assert!(matches!(err, Halt::Interrupted), "got: {err:?}");
    }

    #[test]
    fn read_line_strips_only_the_terminator() {
        let mut c = console("  spaced out \r\n");
        let line = c.read_line("> ").expect("io").expect("line");
        assert_eq!(line, "  spaced out ");
    }

    #[test]
    fn read_line_without_trailing_newline_still_returns_text() {
        let mut c = console("last");
        assert_eq!(c.read_line("> ").expect("io").as_deref(), Some("last"));
        assert_eq!(c.read_line("> ").expect("io"), None);
    }

    #[test]
    fn ask_trims_surrounding_whitespace() {
        let mut c = console("  https://example.com/u/r.git \n");
        assert_eq!(ask(&mut c, "URL: ").expect("line"), "https://example.com/u/r.git");
    }

    #[test]
    fn banner_and_errors_go_to_their_streams() {
        let mut c = console("");
        c.banner("Creating the commit").expect("banner");
        c.emit_err("fatal").expect("stderr");
        let (_, out, err) = c.into_parts();
        assert_eq!(String::from_utf8(out).expect("utf8"), "\n--- Creating the commit ---\n");
        assert_eq!(String::from_utf8(err).expect("utf8"), "fatal\n");
    }
}
