//! User I/O capability of the shell.

use std::io::{self, BufRead, StdinLock, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// =#========================================================================#=
// CONSOLE (Trait)
// =#========================================================================$=
/// Everything the [Session](crate::shell::Session) needs from its user.
///
/// Implementations decide how prompts are rendered (terminal, GUI, speech)
/// and where answers come from; the session never touches stdin/stdout.
pub trait Console {
    /// Shows an informational message.
    fn say(&mut self, message: &str) -> io::Result<()>;

    /// Shows an error or warning message.
    fn warn(&mut self, message: &str) -> io::Result<()>;

    /// Asks for a line of text.
    ///
    /// # Returns
    /// * `Ok(Some(line))` - The answer without trailing newline
    /// * `Ok(None)` - Input is closed
    fn ask_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Asks a yes/no question; anything but an answer starting with `y` is "no".
    ///
    /// # Errors
    /// Fails with [io::ErrorKind::UnexpectedEof] if input is closed.
    fn ask_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        match self.ask_line(prompt)? {
            Some(answer) => Ok(matches!(answer.trim_start().chars().next(), Some('y' | 'Y'))),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")),
        }
    }

    /// Asks whether the object has the given qualifier, while guessing.
    fn ask_qualifier(&mut self, qualifier: &str) -> io::Result<bool> {
        self.ask_yes_no(&format!("Is object ... {qualifier}? [y/N]: "))
    }
}

// =#========================================================================#=
// STD CONSOLE
// =#========================================================================$=
/// [Console] on the process' stdin and (colored) stdout.
pub struct StdConsole {
    out: StandardStream,
    input: StdinLock<'static>,
}

impl StdConsole {
    /// Creates a console on stdin/stdout.
    ///
    /// # Arguments
    /// * `color` - Whether to color prompts (only if stdout supports it)
    pub fn new(color: bool) -> Self {
        let choice = if color { ColorChoice::Auto } else { ColorChoice::Never };
        Self {
            out: StandardStream::stdout(choice),
            input: io::stdin().lock(),
        }
    }

    fn write_colored(&mut self, text: &str, color: Option<Color>, bold: bool) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(color).set_bold(bold))?;
        write!(self.out, "{text}")?;
        self.out.reset()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

impl Console for StdConsole {
    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        self.write_colored(message, Some(Color::Red), true)?;
        writeln!(self.out)
    }

    fn ask_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.write_colored(prompt, Some(Color::White), true)?;
        self.read_line()
    }

    fn ask_qualifier(&mut self, qualifier: &str) -> io::Result<bool> {
        self.write_colored("Is object ... ", Some(Color::White), true)?;
        self.write_colored(qualifier, Some(Color::Cyan), false)?;
        self.ask_yes_no("? [y/N]: ")
    }
}
