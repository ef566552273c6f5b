//! Interactive console for prompts and progress messages
//!
//! Config generation, the toggle messages and the final exit pause all go
//! through [`Console`], so the whole flow can be driven from an in-memory
//! script in tests.

use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented user interaction
pub trait Console {
    /// Print one full line
    fn say(&mut self, message: &str) -> io::Result<()>;

    /// Print `prompt` (no newline) and read one line, without its terminator.
    ///
    /// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Like [`Console::ask`], for values that should not be echoed
    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)
    }

    /// Wait for Enter before the window closes. Input errors are ignored.
    fn pause(&mut self) {
        let _ = self.say("Press Enter to exit...");
        let _ = self.ask("");
    }
}

/// Console over any buffered reader and writer
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect what was printed
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "unexpected end of input",
            ));
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

/// Console bound to the process stdin/stdout
pub struct StdConsole {
    inner: LineConsole<io::StdinLock<'static>, io::Stdout>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            inner: LineConsole::new(io::stdin().lock(), io::stdout()),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn say(&mut self, message: &str) -> io::Result<()> {
        self.inner.say(message)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.inner.ask(prompt)
    }

    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        // Piped input has no terminal to hide echo on
        if io::stdin().is_terminal() {
            rpassword::prompt_password(prompt)
        } else {
            self.inner.ask(prompt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> LineConsole<Cursor<Vec<u8>>, Vec<u8>> {
        LineConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_strips_line_endings() {
        let mut c = console("first\r\nsecond\nthird");

        assert_eq!(c.ask("> ").unwrap(), "first");
        assert_eq!(c.ask("> ").unwrap(), "second");
        assert_eq!(c.ask("> ").unwrap(), "third");
    }

    #[test]
    fn test_ask_keeps_inner_whitespace() {
        let mut c = console("  pass word \n");
        assert_eq!(c.ask_secret("Password: ").unwrap(), "  pass word ");
    }

    #[test]
    fn test_ask_eof_is_error() {
        let mut c = console("");
        let err = c.ask("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_prompt_and_messages_written() {
        let mut c = console("x\n");
        c.say("hello").unwrap();
        c.ask("Enter: ").unwrap();

        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out, "hello\nEnter: ");
    }

    #[test]
    fn test_pause_tolerates_eof() {
        let mut c = console("");
        c.pause();

        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Press Enter to exit..."));
    }
}
