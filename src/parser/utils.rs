use std::fmt;

/// A reference to a line and column in an input source file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Default)]
pub struct SourcePosition {
    line: usize,
    col: usize,
}

impl SourcePosition {
    /// Creates a position pointing at `line` and `col` of the input source.
    pub fn new(line: usize, col: usize) -> SourcePosition {
        SourcePosition { line, col }
    }

    /// A position for definitions created programmatically rather than read
    /// from source text.
    pub fn unknown() -> SourcePosition {
        SourcePosition { line: 0, col: 0 }
    }

    /// Whether this position points into a real source.
    pub fn is_known(&self) -> bool {
        self.line != 0 || self.col != 0
    }

    /// The line of the character in the input source
    pub fn line(&self) -> usize {
        self.line
    }

    /// The column of the character in the input source
    pub fn column(&self) -> usize {
        self.col
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_known() {
            write!(f, "[@{}:{}]", self.line, self.col)
        } else {
            write!(f, "[@unknown]")
        }
    }
}
