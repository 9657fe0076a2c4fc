// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use log::Level;
use log::LevelFilter;
use log::Metadata;
use log::Record;

use crate::Error;
use crate::append::Append;

/// A shared, immutable logger handle.
///
/// Cloning is cheap and every clone refers to the same sink, layout and level threshold; two
/// handles compare equal only if they are clones of each other. A different configuration needs a
/// new handle, see [`new`](crate::new) and [`builder`](crate::builder).
///
/// Emit records with the crate's macros, or through [`log::Log`]:
///
/// ```
/// use ctxlog::Format;
///
/// let logger = ctxlog::new(std::io::stdout(), Format::Logfmt, true);
/// ctxlog::debug!(logger, "cache warmed in {}ms", 12);
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    level: LevelFilter,
    append: Box<dyn Append>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.inner.level)
            .field("append", &self.inner.append)
            .finish()
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Logger {}

impl Logger {
    pub(super) fn new(level: LevelFilter, append: Box<dyn Append>) -> Self {
        Self {
            inner: Arc::new(LoggerInner { level, append }),
        }
    }

    /// The minimum level this logger emits.
    pub fn level(&self) -> LevelFilter {
        self.inner.level
    }

    /// Whether records at `level` are emitted.
    pub fn enabled_at(&self, level: Level) -> bool {
        level <= self.inner.level
    }

    /// Whether both handles refer to the same logger.
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Set up the global [`log`] logger with a clone of this handle.
    ///
    /// Afterwards `log::info!` and friends are routed through this logger.
    ///
    /// # Errors
    ///
    /// An error is returned if the global logger has already been set.
    pub fn apply(&self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(self.inner.level);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.enabled_at(metadata.level())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Err(err) = self.inner.append.append(record) {
            handle_log_error(record, err);
        }
    }

    fn flush(&self) {
        if let Err(err) = self.inner.append.flush() {
            handle_flush_error(err);
        }
    }
}

fn handle_log_error(record: &Record, error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error:?}
"###,
        args = record.args(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
        args = record.args(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}

fn handle_flush_error(error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform flush.
    Error: {error:?}
"###,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular flush.
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
    );
}
