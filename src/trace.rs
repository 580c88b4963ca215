//! Stack capture with symbol resolution
//!
//! Bounded walk of the current call stack, resolving each frame to a symbol
//! name and source location where debug info allows. Frames past the cap are
//! dropped silently; the cap is the contract.

use std::fmt;

/// Default frame cap, matching the usual diagnostic depth.
pub const DEFAULT_MAX_FRAMES: usize = 100;

/// One resolved call-stack frame
pub struct Frame {
    /// Instruction pointer of the frame
    pub ip: usize,
    /// Demangled symbol name, if resolvable
    pub symbol: Option<String>,
    /// Source file and line, if debug info is present
    pub location: Option<(String, u32)>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(name) => write!(f, "{:#018x} - {}", self.ip, name)?,
            None => write!(f, "{:#018x} - <unknown>", self.ip)?,
        }
        if let Some((file, line)) = &self.location {
            write!(f, " at {}:{}", file, line)?;
        }
        Ok(())
    }
}

/// Walk the current stack, resolving up to `max_frames` frames.
pub fn capture(max_frames: usize) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(max_frames.min(DEFAULT_MAX_FRAMES));

    backtrace::trace(|frame| {
        if frames.len() >= max_frames {
            return false;
        }

        let ip = frame.ip() as usize;
        let mut symbol = None;
        let mut location = None;

        backtrace::resolve_frame(frame, |sym| {
            if symbol.is_none() {
                symbol = sym.name().map(|n| n.to_string());
            }
            if location.is_none() {
                if let (Some(file), Some(line)) = (sym.filename(), sym.lineno()) {
                    location = Some((file.display().to_string(), line));
                }
            }
        });

        frames.push(Frame { ip, symbol, location });
        true
    });

    frames
}

/// Print a capture of the current stack to stdout, one frame per line.
pub fn print(max_frames: usize) {
    for (i, frame) in capture(max_frames).iter().enumerate() {
        println!("{:3}: {}", i, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Extra call depth so the capture has something to walk.
    #[inline(never)]
    fn inner_capture(max: usize) -> Vec<Frame> {
        capture(max)
    }

    #[inline(never)]
    fn outer_capture(max: usize) -> Vec<Frame> {
        inner_capture(max)
    }

    #[test]
    fn capture_is_nonempty_and_bounded() {
        let frames = outer_capture(DEFAULT_MAX_FRAMES);
        assert!(!frames.is_empty());
        assert!(frames.len() <= DEFAULT_MAX_FRAMES);
        assert!(frames.iter().all(|f| f.ip != 0));
    }

    #[test]
    fn capture_honors_small_cap() {
        let frames = outer_capture(3);
        assert!(frames.len() <= 3);
    }

    #[test]
    fn frame_display_mentions_ip() {
        let frame = Frame {
            ip: 0x1234,
            symbol: Some("demo::main".to_string()),
            location: Some(("src/main.rs".to_string(), 10)),
        };
        let line = frame.to_string();
        assert!(line.contains("0x"));
        assert!(line.contains("demo::main"));
        assert!(line.contains("src/main.rs:10"));
    }

    #[test]
    fn frame_display_handles_unresolved() {
        let frame = Frame {
            ip: 0x1,
            symbol: None,
            location: None,
        };
        assert!(frame.to_string().contains("<unknown>"));
    }
}
