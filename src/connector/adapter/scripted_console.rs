use std::collections::VecDeque;
use std::io;

use crate::application::Console;

/// [`Console`] fed from a fixed list of input lines that captures everything
/// written to it. Input runs out as end-of-input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    output: String,
    pauses: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: String::new(),
            pauses: 0,
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn pauses(&self) -> usize {
        self.pauses
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.inputs.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push_str(line);
        self.output.push('\n');
        Ok(())
    }

    fn pause(&mut self) -> io::Result<()> {
        self.pauses += 1;
        Ok(())
    }
}
