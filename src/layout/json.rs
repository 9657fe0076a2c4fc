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

use std::fmt::Arguments;

use jiff::Timestamp;
use jiff::Zoned;
use jiff::tz::TimeZone;
use log::Record;
use log::kv::Key;
use log::kv::Value as KvValue;
use log::kv::VisitSource;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::Error;
use crate::layout::Layout;

/// A JSON layout for formatting log records.
///
/// Output format:
///
/// ```json
/// {"time":"2024-08-11T22:44:57.172+08:00","level":"ERROR","msg":"connection refused","peer":"10.0.0.7:443"}
/// {"time":"2024-08-11T22:44:57.172+08:00","level":"INFO","msg":"server started","port":"8080"}
/// {"time":"2024-08-11T22:44:57.173+08:00","level":"DEBUG","source":{"module":"server","file":"src/server.rs","line":42},"msg":"accepted connection"}
/// ```
///
/// Key-value pairs of the record are flattened into the object as string values.
///
/// # Examples
///
/// ```
/// use ctxlog::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default().with_source(true);
/// ```
#[derive(Default, Debug, Clone)]
pub struct JsonLayout {
    tz: Option<TimeZone>,
    with_source: bool,
}

impl JsonLayout {
    /// Sets the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use ctxlog::layout::JsonLayout;
    /// use jiff::tz::TimeZone;
    ///
    /// let json_layout = JsonLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    /// Include a `source` object with the call site.
    pub fn with_source(mut self, with_source: bool) -> Self {
        self.with_source = with_source;
        self
    }
}

struct KvCollector<'a> {
    kvs: &'a mut Map<String, Value>,
}

impl<'kvs> VisitSource<'kvs> for KvCollector<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: KvValue<'kvs>) -> Result<(), log::kv::Error> {
        let k = key.to_string();
        let v = value.to_string();
        self.kvs.insert(k, v.into());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
struct Source<'a> {
    module: &'a str,
    file: &'a str,
    line: u32,
}

#[derive(Debug, Clone, Serialize)]
struct RecordLine<'a> {
    #[serde(serialize_with = "serialize_time")]
    time: Zoned,
    level: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<Source<'a>>,
    #[serde(serialize_with = "serialize_args")]
    msg: &'a Arguments<'a>,
    #[serde(flatten)]
    kvs: Map<String, Value>,
}

fn serialize_time<S>(time: &Zoned, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&time.strftime("%Y-%m-%dT%H:%M:%S.%3f%:z"))
}

fn serialize_args<S>(args: &Arguments, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(args)
}

impl Layout for JsonLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut kvs = Map::new();
        let mut visitor = KvCollector { kvs: &mut kvs };
        record
            .key_values()
            .visit(&mut visitor)
            .map_err(Error::from_kv_error)?;

        let source = if self.with_source {
            Some(Source {
                module: record.module_path().unwrap_or_default(),
                file: record.file().unwrap_or_default(),
                line: record.line().unwrap_or_default(),
            })
        } else {
            None
        };

        let record_line = RecordLine {
            time: match self.tz.clone() {
                Some(tz) => Timestamp::now().to_zoned(tz),
                None => Zoned::now(),
            },
            level: record.level().as_str(),
            source,
            msg: record.args(),
            kvs,
        };

        serde_json::to_vec(&record_line).map_err(Error::from_serde_error)
    }
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;
    use log::Level;

    use super::*;

    fn format(layout: &JsonLayout, record: &Record) -> Map<String, Value> {
        let bytes = layout.format(record).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_level_and_msg() {
        let layout = JsonLayout::default().timezone(TimeZone::UTC);
        let line = format(
            &layout,
            &Record::builder()
                .args(format_args!("test"))
                .level(Level::Info)
                .build(),
        );
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["msg"], "test");
        assert!(line["time"].as_str().unwrap().ends_with("+00:00"));
        assert!(!line.contains_key("source"));
    }

    #[test]
    fn test_source_and_kvs() {
        let layout = JsonLayout::default().with_source(true);
        let kvs = [("port", 8080)];
        let line = format(
            &layout,
            &Record::builder()
                .args(format_args!("server started"))
                .level(Level::Warn)
                .module_path(Some("server"))
                .file(Some("src/server.rs"))
                .line(Some(42))
                .key_values(&kvs)
                .build(),
        );
        assert_eq!(line["level"], "WARN");
        assert_eq!(line["port"], "8080");
        assert_eq!(line["source"]["file"], "src/server.rs");
        assert_eq!(line["source"]["line"], 42);
        assert_eq!(line["source"]["module"], "server");
    }
}
