//! Line sink for back-ends.
//!
//! Python-family targets are block-structured by indentation, so back-ends
//! hand over whole lines with a nesting level instead of raw text.

/// Spaces per nesting level.
pub const INDENT_WIDTH: usize = 4;

/// Receives rendered lines.
pub trait Emitter {
    /// Write `text` at nesting `level`, terminated by a newline.
    fn line(&mut self, level: usize, text: &str);

    /// Write an empty line. Blank lines carry no indentation.
    fn blank_line(&mut self);
}

/// Collects lines into a `String`.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn line(&mut self, level: usize, text: &str) {
        self.buffer.push_str(&" ".repeat(level * INDENT_WIDTH));
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn blank_line(&mut self) {
        self.buffer.push('\n');
    }
}
