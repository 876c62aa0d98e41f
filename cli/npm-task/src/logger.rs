// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! `log` backend that speaks the host's logging commands

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use tasklib::command::{write_line, TaskCommand};

struct TaskLogger {
    level: LevelFilter,
    sink: fn(&str) -> io::Result<()>,
    // cleared on the first failed write; later records are dropped
    sink_open: AtomicBool,
}

impl TaskLogger {
    fn new(level: LevelFilter, sink: fn(&str) -> io::Result<()>) -> Self {
        Self {
            level,
            sink,
            sink_open: AtomicBool::new(true),
        }
    }
}

fn render(level: Level, message: String) -> String {
    match level {
        Level::Error => TaskCommand::error(message).to_string(),
        Level::Warn => TaskCommand::warning(message).to_string(),
        Level::Info => message,
        Level::Debug | Level::Trace => TaskCommand::debug(message).to_string(),
    }
}

impl Log for TaskLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) || !self.sink_open.load(Ordering::Relaxed) {
            return;
        }

        let line = render(record.level(), record.args().to_string());
        if (self.sink)(&line).is_err() {
            self.sink_open.store(false, Ordering::Relaxed);
        }
    }

    fn flush(&self) {}
}

fn level_for(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the logger. Debug records are only emitted when `debug` is set.
pub fn init(debug: bool) -> Result<(), SetLoggerError> {
    let level = level_for(debug);
    log::set_boxed_logger(Box::new(TaskLogger::new(level, write_line)))?;
    log::set_max_level(level);
    Ok(())
}
