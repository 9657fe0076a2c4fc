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

use log::kv::Key;
use log::kv::Source;
use log::kv::Value;
use log::kv::VisitSource;

/// Displays a record's key-value pairs as ` key=value` segments.
///
/// Used by layouts that print key-value pairs after the message.
pub struct KvDisplay<'kvs> {
    kv: &'kvs dyn Source,
}

impl<'kvs> KvDisplay<'kvs> {
    pub fn new(kv: &'kvs dyn Source) -> Self {
        Self { kv }
    }
}

impl fmt::Display for KvDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut visitor = KvWriter { writer: f };
        self.kv.visit(&mut visitor).map_err(|_| fmt::Error)
    }
}

struct KvWriter<'a, 'b> {
    writer: &'b mut fmt::Formatter<'a>,
}

impl<'kvs> VisitSource<'kvs> for KvWriter<'_, '_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), log::kv::Error> {
        write!(self.writer, " {key}=")?;
        write_value(self.writer, &value.to_string())?;
        Ok(())
    }
}

/// Whether `s` must be quoted to stay a single logfmt token on a single line.
pub(crate) fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s.contains(['=', '"'])
        || s.chars().any(|c| c.is_control() || c.is_whitespace())
}

/// Write `value`, quoted with debug escaping if [`needs_quoting`] says so.
pub(crate) fn write_value<W: fmt::Write>(w: &mut W, value: &str) -> fmt::Result {
    if needs_quoting(value) {
        write!(w, "\"{}\"", value.escape_debug())
    } else {
        w.write_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kv_display() {
        let kvs = [("user", "alice"), ("attempt", "3")];
        assert_eq!(KvDisplay::new(&kvs).to_string(), " user=alice attempt=3");
    }

    #[test]
    fn test_kv_display_quotes_values() {
        let kvs = [("user", "john doe"), ("note", "a\tb"), ("empty", "")];
        assert_eq!(
            KvDisplay::new(&kvs).to_string(),
            r#" user="john doe" note="a\tb" empty="""#
        );
    }

    #[test]
    fn test_needs_quoting() {
        for s in ["", "a b", "a=b", "say \"hi\"", "one\ntwo", "a\tb", "cr\r", "nul\0"] {
            assert!(needs_quoting(s), "{s:?}");
        }
        for s in ["alice", "10.0.0.7:443", "src/server.rs:42", "ünïcode"] {
            assert!(!needs_quoting(s), "{s:?}");
        }
    }
}
