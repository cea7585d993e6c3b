//! Position and location utilities.
//!
//! Every location is zero-based. Editors that display one-based lines are
//! responsible for translating at their own boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a source file (0-indexed line and character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (UTF-16 code units)
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// A range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }

    /// Whether `position` lies inside this range (end inclusive).
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// Whether `other` lies entirely inside this range.
    pub fn encloses(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A file name plus range. This is the only addressing scheme that crosses
/// process boundaries, so it must stay plain data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFileLocation {
    pub file_name: String,
    pub range: Range,
}

impl SourceFileLocation {
    pub fn new(file_name: impl Into<String>, range: Range) -> Self {
        SourceFileLocation {
            file_name: file_name.into(),
            range,
        }
    }

    /// A zero-width location at `line:character`.
    pub fn at(file_name: impl Into<String>, line: u32, character: u32) -> Self {
        let position = Position::new(line, character);
        Self::new(file_name, Range::new(position, position))
    }
}

impl fmt::Display for SourceFileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_name, self.range.start.line, self.range.start.character
        )
    }
}
