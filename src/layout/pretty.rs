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

use std::fmt::Write;

use colored::Color;
use log::Level;
use log::Record;
use log::kv::Key;
use log::kv::Value;
use log::kv::VisitSource;

use crate::Error;
use crate::layout::KvDisplay;
use crate::layout::Layout;
use crate::layout::kv::write_value;

const RESET: &str = "\x1b[0m";
const FAINT: &str = "\x1b[2m";

/// A human-friendly layout with colored, three-letter level tags.
///
/// Output format:
///
/// ```text
/// ERR connection refused peer=10.0.0.7:443
/// WRN retrying request
/// INF server started port=8080
/// DBG src/server.rs:42 accepted connection
/// ```
///
/// Timestamps are not printed. The call site is printed only if enabled with
/// [`PrettyLayout::with_source`].
///
/// ANSI escapes are written regardless of whether the sink is a terminal; turn them off with
/// [`PrettyLayout::no_color`].
#[derive(Default, Debug, Clone)]
pub struct PrettyLayout {
    colors: LevelColor,
    no_color: bool,
    with_source: bool,
}

impl PrettyLayout {
    /// Customize the color of each level tag.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Disable ANSI escapes.
    pub fn no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Print `file:line` of the call site before the message.
    pub fn with_source(mut self, with_source: bool) -> Self {
        self.with_source = with_source;
        self
    }
}

/// Colors of the level tags; `None` prints the tag as is.
#[derive(Debug, Clone)]
pub struct LevelColor {
    pub error: Option<Color>,
    pub warn: Option<Color>,
    pub info: Option<Color>,
    pub debug: Option<Color>,
    pub trace: Option<Color>,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            error: Some(Color::BrightRed),
            warn: Some(Color::BrightYellow),
            info: Some(Color::BrightGreen),
            debug: None,
            trace: None,
        }
    }
}

impl LevelColor {
    fn color(&self, level: Level) -> Option<Color> {
        match level {
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Trace => self.trace,
        }
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERR",
        Level::Warn => "WRN",
        Level::Info => "INF",
        Level::Debug => "DBG",
        Level::Trace => "TRC",
    }
}

struct FaintKvWriter<'a> {
    text: &'a mut String,
}

impl<'kvs> VisitSource<'kvs> for FaintKvWriter<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), log::kv::Error> {
        write!(self.text, " {FAINT}{key}={RESET}")?;
        write_value(self.text, &value.to_string())?;
        Ok(())
    }
}

impl PrettyLayout {
    fn write_record(&self, text: &mut String, record: &Record) -> std::fmt::Result {
        let level = record.level();
        let tag = level_tag(level);
        match self.colors.color(level) {
            Some(color) if !self.no_color => {
                write!(text, "\x1b[{}m{tag}{RESET}", color.to_fg_str())?;
            }
            _ => text.push_str(tag),
        }

        if self.with_source {
            if let Some(file) = record.file() {
                let line = record.line().unwrap_or_default();
                if self.no_color {
                    write!(text, " {file}:{line}")?;
                } else {
                    write!(text, " {FAINT}{file}:{line}{RESET}")?;
                }
            }
        }

        write!(text, " {}", record.args())
    }
}

impl Layout for PrettyLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut text = String::new();
        self.write_record(&mut text, record)
            .map_err(Error::from_fmt_error)?;

        if self.no_color {
            write!(text, "{}", KvDisplay::new(record.key_values()))
                .map_err(Error::from_fmt_error)?;
        } else {
            let mut visitor = FaintKvWriter { text: &mut text };
            record
                .key_values()
                .visit(&mut visitor)
                .map_err(Error::from_kv_error)?;
        }

        Ok(text.into_bytes())
    }
}
