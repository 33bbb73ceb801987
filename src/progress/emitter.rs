//! Build log emitter
//!
//! Writes the human-readable build log. Lines are indented by nesting depth:
//! titles at column zero, process steps by two spaces and subprocess details
//! by four.

use std::fmt::Display;
use std::io::{self, Write};

use crate::launch::LaunchProcess;

/// Verbosity of the build log
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// Parses `BP_LOG_LEVEL` style values, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "INFO" => Some(LogLevel::Info),
            "DEBUG" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

pub struct Emitter<W: Write> {
    writer: W,
    level: LogLevel,
}

impl<W: Write> Emitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            level: LogLevel::Info,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn title(&mut self, message: impl Display) -> io::Result<()> {
        self.line(0, message)
    }

    pub fn process(&mut self, message: impl Display) -> io::Result<()> {
        self.line(1, message)
    }

    pub fn subprocess(&mut self, message: impl Display) -> io::Result<()> {
        self.line(2, message)
    }

    /// Subprocess-depth line shown only at debug level
    pub fn debug(&mut self, message: impl Display) -> io::Result<()> {
        if self.level < LogLevel::Debug {
            return Ok(());
        }
        self.line(2, message)
    }

    pub fn break_line(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Lists processes in launch order, marking the default one
    pub fn launch_processes(&mut self, processes: &[LaunchProcess]) -> io::Result<()> {
        self.process("Assigning launch processes:")?;
        for process in processes {
            self.subprocess(process)?;
        }
        self.break_line()
    }

    fn line(&mut self, depth: usize, message: impl Display) -> io::Result<()> {
        writeln!(self.writer, "{:indent$}{}", "", message, indent = depth * 2)
    }
}
