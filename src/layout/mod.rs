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

//! Layouts for formatting log records.

use std::fmt;

use log::Record;

use crate::Error;

mod json;
mod kv;
mod logfmt;
mod pretty;

pub use self::json::JsonLayout;
pub use self::kv::KvDisplay;
pub use self::logfmt::LogfmtLayout;
pub use self::pretty::LevelColor;
pub use self::pretty::PrettyLayout;

/// A layout for formatting log records.
///
/// The returned bytes hold one record without the trailing newline.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Formats a log record.
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
