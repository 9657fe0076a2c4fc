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

use std::io::Write;
use std::sync::LazyLock;

use log::LevelFilter;

use crate::Format;
use crate::append::Writer;

mod builder;
mod log_impl;

pub use self::builder::Builder;
pub use self::builder::builder;
pub use self::log_impl::Logger;

static DEFAULT: LazyLock<Logger> = LazyLock::new(|| new(std::io::stdout(), Format::Pretty, false));

/// The process-wide default logger.
///
/// It logs to stdout in the [`Format::Pretty`] format at the `Info` level, and is what
/// [`from_context`](crate::from_context) returns when no logger is attached.
pub fn default_logger() -> &'static Logger {
    &DEFAULT
}

/// Create a [`Logger`] writing to `sink` in the given `format`.
///
/// A non-verbose logger emits `Info` and above. A verbose logger emits `Debug` and above and
/// annotates every record with its call site.
///
/// # Examples
///
/// ```
/// use ctxlog::Format;
///
/// let logger = ctxlog::new(std::io::stderr(), Format::Json, false);
/// ctxlog::info!(logger, "listening on {}", 8080);
/// ```
pub fn new<W>(sink: W, format: Format, verbose: bool) -> Logger
where
    W: Write + Send + 'static,
{
    let (level, with_source) = if verbose {
        (LevelFilter::Debug, true)
    } else {
        (LevelFilter::Info, false)
    };

    builder()
        .level(level)
        .append(Writer::new(sink, format.layout(with_source)))
        .build()
}
