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

use log::LevelFilter;

use crate::Logger;
use crate::append::Append;

/// Create a new empty [`Builder`].
///
/// A [`Logger`] can only be built once an [`Append`] is configured:
///
/// ```rust
/// use ctxlog::append::Writer;
/// use ctxlog::layout::JsonLayout;
/// use log::LevelFilter;
///
/// let logger = ctxlog::builder()
///     // .build()  CANNOT COMPILE: a builder without Append
///     .level(LevelFilter::Warn)
///     .append(Writer::new(std::io::stderr(), JsonLayout::default()))
///     .build();
/// ```
pub fn builder() -> Builder<false> {
    Builder::default()
}

/// A builder for configuring a [`Logger`]. See also [`builder`] for a fluent API.
///
/// * `READY=false`: The initialized state. You can configure the level threshold. Once an append
///   is configured, the builder transits to `READY=true`.
/// * `READY=true`: The builder can be [built][Builder::build] into a [`Logger`].
#[must_use = "call `build` to create the logger"]
#[derive(Debug)]
pub struct Builder<const READY: bool = true> {
    level: LevelFilter,
    append: Option<Box<dyn Append>>,
}

impl Default for Builder<false> {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder<false> {
    /// Create a new empty [`Builder`].
    ///
    /// The level threshold defaults to `Info`.
    pub fn new() -> Self {
        Self {
            level: LevelFilter::Info,
            append: None,
        }
    }
}

impl<const READY: bool> Builder<READY> {
    /// Set the minimum level that is emitted.
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Set the [`Append`] that receives the records. Replaces any previously set append.
    pub fn append(self, append: impl Into<Box<dyn Append>>) -> Builder<true> {
        Builder {
            level: self.level,
            append: Some(append.into()),
        }
    }
}

impl Builder<true> {
    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        let append = self
            .append
            .expect("Builder<true> is only reachable through Builder::append");
        Logger::new(self.level, append)
    }
}
