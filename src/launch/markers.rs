// src/launch/markers.rs

//! Phase marker lines.
//!
//! Markers are plain, unversioned lines on stdout, one per phase
//! transition. They are flushed immediately so they interleave correctly
//! with the output of the child, which shares our stdout.

use std::io::{self, Write};

use tracing::warn;

/// A point in the launch sequence that gets a marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ForkStart,
    ForkFailed,
    ChildStart,
    AfterSetpgrp,
    ChildExecFailed,
    ParentStart,
    ParentEnd,
    ForkEnd,
}

impl Phase {
    pub fn marker(self) -> &'static str {
        match self {
            Phase::ForkStart => "Fork start",
            Phase::ForkFailed => "Fork failed, quitting!!!!!!",
            Phase::ChildStart => "Child Process",
            Phase::AfterSetpgrp => "AFTER SETPGRP",
            Phase::ChildExecFailed => "Child Process end",
            Phase::ParentStart => "Parent start",
            Phase::ParentEnd => "Parent end",
            Phase::ForkEnd => "Fork end",
        }
    }
}

/// Destination for marker lines; may be disabled.
pub struct MarkerWriter {
    out: Option<Box<dyn Write + Send>>,
}

impl MarkerWriter {
    pub fn stdout() -> Self {
        Self::to_writer(io::stdout())
    }

    pub fn disabled() -> Self {
        Self { out: None }
    }

    pub fn to_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Some(Box::new(out)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Write the marker for `phase`.
    ///
    /// Write errors are logged and otherwise ignored: markers carry no
    /// contract, and a closed stdout must not abort the launch.
    pub fn emit(&mut self, phase: Phase) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        let res = writeln!(out, "{}", phase.marker()).and_then(|()| out.flush());
        if let Err(e) = res {
            warn!(?phase, error = %e, "failed to write phase marker");
        }
    }
}

impl std::fmt::Debug for MarkerWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerWriter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
