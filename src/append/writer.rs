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
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use log::Record;

use crate::Error;
use crate::append::Append;
use crate::layout::Layout;

/// An appender that writes newline-terminated records to any [`Write`] sink.
///
/// The sink is owned by the appender and never opened or closed by it; pass a file, a process
/// output stream or an in-memory buffer.
///
/// # Examples
///
/// ```
/// use ctxlog::append::Writer;
/// use ctxlog::layout::LogfmtLayout;
///
/// let append = Writer::new(std::io::stderr(), LogfmtLayout::default());
/// ```
pub struct Writer<W> {
    writer: Mutex<W>,
    layout: Box<dyn Layout>,
}

impl<W> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send + 'static> Writer<W> {
    /// Creates a new `Writer` appender with the given sink and layout.
    pub fn new(writer: W, layout: impl Into<Box<dyn Layout>>) -> Self {
        Self {
            writer: Mutex::new(writer),
            layout: layout.into(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send + 'static> Append for Writer<W> {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        self.lock().write_all(&bytes).map_err(Error::from_io_error)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        self.lock().flush().map_err(Error::from_io_error)
    }
}
