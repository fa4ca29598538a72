use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

use crate::application::Console;

/// [`Console`] over the process's standard input and output.
pub struct StdioConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdioConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }

    fn wait_for_key() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let result = loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
                Ok(_) => continue,
                Err(e) => break Err(e),
            }
        };
        terminal::disable_raw_mode()?;
        result
    }
}

impl Default for StdioConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdioConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        writeln!(out, "{}", line)?;
        out.flush()
    }

    fn pause(&mut self) -> io::Result<()> {
        if self.stdin.is_terminal() {
            Self::wait_for_key()
        } else {
            // Piped input: consume one line in place of a key press
            self.read_line().map(|_| ())
        }
    }
}
