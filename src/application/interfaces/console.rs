use std::io;

/// Line-oriented interactive console.
pub trait Console {
    /// Read one line without its terminator. `Ok(None)` means end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Block until the user presses a key.
    fn pause(&mut self) -> io::Result<()>;
}
