//! Struct-literal initialization demo
//!
//! The Rust counterpart of C designated initializers: field names in the
//! literal, `..Default::default()` for the rest.

use std::fmt;

/// Three-field sample record
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SampleRecord {
    pub a: i32,
    pub b: i32,
    pub c: i32,
}

impl SampleRecord {
    /// The fixed demo value: `{ .a = 1, .b = 2, .c = 3 }`.
    pub fn demo() -> Self {
        SampleRecord { a: 1, b: 2, c: 3 }
    }
}

impl fmt::Display for SampleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a = {}. b = {}. c = {}.", self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_prints_like_the_original() {
        assert_eq!(SampleRecord::demo().to_string(), "a = 1. b = 2. c = 3.");
    }

    #[test]
    fn partial_literal_defaults_the_rest() {
        let record = SampleRecord {
            a: 9,
            ..Default::default()
        };
        assert_eq!(record, SampleRecord { a: 9, b: 0, c: 0 });
    }
}
