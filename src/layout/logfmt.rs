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

use jiff::Timestamp;
use jiff::Zoned;
use jiff::tz::TimeZone;
use log::Record;
use log::kv::Key;
use log::kv::Value;
use log::kv::VisitSource;

use crate::Error;
use crate::layout::Layout;
use crate::layout::kv::needs_quoting;
use crate::layout::kv::write_value;

/// A logfmt layout for formatting log records.
///
/// Output format:
///
/// ```text
/// time=2025-03-31T21:04:28.986+08:00 level=ERROR msg="connection refused" peer=10.0.0.7:443
/// time=2025-03-31T21:04:28.991+08:00 level=INFO msg="server started" port=8080
/// time=2025-03-31T21:04:28.991+08:00 level=DEBUG source=src/server.rs:42 msg="accepted connection"
/// ```
///
/// # Examples
///
/// ```
/// use ctxlog::layout::LogfmtLayout;
///
/// let logfmt_layout = LogfmtLayout::default();
/// ```
#[derive(Default, Debug, Clone)]
pub struct LogfmtLayout {
    tz: Option<TimeZone>,
    with_source: bool,
}

impl LogfmtLayout {
    /// Sets the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use ctxlog::layout::LogfmtLayout;
    /// use jiff::tz::TimeZone;
    ///
    /// let logfmt_layout = LogfmtLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    /// Include a `source=file:line` pair with the call site.
    pub fn with_source(mut self, with_source: bool) -> Self {
        self.with_source = with_source;
        self
    }
}

// The encode logic follows https://github.com/go-logfmt/logfmt/blob/76262ea7/encode.go.
fn encode_key_value(text: &mut String, key: &str, value: &str) -> std::fmt::Result {
    if !text.is_empty() {
        text.push(' ');
    }

    if needs_quoting(key) {
        write!(text, "\"{}\"=", key.escape_debug())?;
    } else {
        write!(text, "{key}=")?;
    }

    write_value(text, value)
}

struct KvFormatter<'a> {
    text: &'a mut String,
}

impl<'kvs> VisitSource<'kvs> for KvFormatter<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), log::kv::Error> {
        encode_key_value(self.text, key.as_str(), &value.to_string())?;
        Ok(())
    }
}

impl LogfmtLayout {
    fn write_head(&self, text: &mut String, record: &Record) -> std::fmt::Result {
        let time = match self.tz.clone() {
            Some(tz) => Timestamp::now().to_zoned(tz),
            None => Zoned::now(),
        };

        encode_key_value(
            text,
            "time",
            &time.strftime("%Y-%m-%dT%H:%M:%S.%3f%:z").to_string(),
        )?;
        encode_key_value(text, "level", record.level().as_str())?;
        if self.with_source {
            let file = record.file().unwrap_or_default();
            let line = record.line().unwrap_or_default();
            encode_key_value(text, "source", &format!("{file}:{line}"))?;
        }
        encode_key_value(text, "msg", &record.args().to_string())
    }
}

impl Layout for LogfmtLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut text = String::new();
        self.write_head(&mut text, record)
            .map_err(Error::from_fmt_error)?;

        let mut visitor = KvFormatter { text: &mut text };
        record
            .key_values()
            .visit(&mut visitor)
            .map_err(Error::from_kv_error)?;

        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    fn format(layout: &LogfmtLayout, record: &Record) -> String {
        String::from_utf8(layout.format(record).unwrap()).unwrap()
    }

    #[test]
    fn test_encode_key_value() {
        let mut text = String::new();
        encode_key_value(&mut text, "msg", "test").unwrap();
        encode_key_value(&mut text, "msg", "hello world").unwrap();
        encode_key_value(&mut text, "q", "say \"hi\"").unwrap();
        encode_key_value(&mut text, "empty", "").unwrap();
        encode_key_value(&mut text, "a key", "v").unwrap();
        assert_eq!(
            text,
            r#"msg=test msg="hello world" q="say \"hi\"" empty="" "a key"=v"#
        );
    }

    #[test]
    fn test_control_characters_are_quoted() {
        let layout = LogfmtLayout::default().timezone(TimeZone::UTC);
        let kvs = [("note", "a\tb")];
        let text = format(
            &layout,
            &Record::builder()
                .args(format_args!("one\ntwo"))
                .level(Level::Warn)
                .key_values(&kvs)
                .build(),
        );
        assert!(!text.contains(['\n', '\t']), "{text}");
        assert!(
            text.ends_with(r#" level=WARN msg="one\ntwo" note="a\tb""#),
            "{text}"
        );
    }

    #[test]
    fn test_level_and_msg() {
        let layout = LogfmtLayout::default();
        let text = format(
            &layout,
            &Record::builder()
                .args(format_args!("test"))
                .level(Level::Info)
                .build(),
        );
        assert!(text.starts_with("time="), "{text}");
        assert!(text.ends_with(" level=INFO msg=test"), "{text}");
    }

    #[test]
    fn test_source_and_kvs() {
        let layout = LogfmtLayout::default()
            .timezone(TimeZone::UTC)
            .with_source(true);
        let kvs = [("peer", "10.0.0.7:443")];
        let text = format(
            &layout,
            &Record::builder()
                .args(format_args!("connection refused"))
                .level(Level::Error)
                .file(Some("src/server.rs"))
                .line(Some(42))
                .key_values(&kvs)
                .build(),
        );
        assert!(
            text.ends_with(
                r#" level=ERROR source=src/server.rs:42 msg="connection refused" peer=10.0.0.7:443"#
            ),
            "{text}"
        );
    }
}
