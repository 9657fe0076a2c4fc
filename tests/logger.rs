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

use ctxlog::Format;
use log::Level;
use log::Log;
use log::Record;
use rand::Rng;
use rand::distr::Alphanumeric;

mod common;

use common::SharedBuf;

#[test]
fn test_format_pretty() {
    let buf = SharedBuf::default();
    let l = ctxlog::new(buf.clone(), Format::Pretty, false);
    ctxlog::info!(l, "test");
    assert_eq!(buf.contents(), "\x1b[92mINF\x1b[0m test\n");
}

#[test]
fn test_format_json() {
    let buf = SharedBuf::default();
    let l = ctxlog::new(buf.clone(), Format::Json, false);
    ctxlog::info!(l, "test");

    let contents = buf.contents();
    assert_eq!(contents.lines().count(), 1);
    let actual: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(actual["level"], "INFO");
    assert_eq!(actual["msg"], "test");
    assert!(actual.get("source").is_none());
}

#[test]
fn test_format_logfmt() {
    let buf = SharedBuf::default();
    let l = ctxlog::new(buf.clone(), Format::Logfmt, false);
    ctxlog::info!(l, "test");
    assert!(buf.contents().contains("level=INFO msg=test\n"));
}

#[test]
fn test_format_logfmt_multiline_message_stays_on_one_line() {
    let buf = SharedBuf::default();
    let l = ctxlog::new(buf.clone(), Format::Logfmt, false);
    ctxlog::info!(l, "one\ntwo");

    let contents = buf.contents();
    assert_eq!(contents.lines().count(), 1, "{contents}");
    assert!(
        contents.ends_with("level=INFO msg=\"one\\ntwo\"\n"),
        "{contents}"
    );
}

#[test]
fn test_format_out_of_range_is_pretty() {
    let buf = SharedBuf::default();
    let l = ctxlog::new(buf.clone(), Format::from(255), false);
    ctxlog::info!(l, "test");
    assert_eq!(buf.contents(), "\x1b[92mINF\x1b[0m test\n");
}

#[test]
fn test_not_verbose() {
    let buf = SharedBuf::default();
    let l = ctxlog::new(buf.clone(), Format::Pretty, false);
    ctxlog::debug!(l, "test");
    assert!(buf.contents().is_empty());
    ctxlog::info!(l, "test");
    assert!(!buf.contents().is_empty());
}

#[test]
fn test_verbose() {
    let buf = SharedBuf::default();
    let l = ctxlog::new(buf.clone(), Format::Pretty, true);
    ctxlog::trace!(l, "test");
    assert!(buf.contents().is_empty());
    ctxlog::debug!(l, "test");
    let contents = buf.contents();
    assert!(contents.starts_with("DBG "), "{contents}");
    assert!(contents.contains("tests/logger.rs:"), "{contents}");
}

#[test]
fn test_verbose_json_source() {
    let buf = SharedBuf::default();
    let l = ctxlog::new(buf.clone(), Format::Json, true);
    ctxlog::debug!(l, "cache warmed in {}ms", 12);

    let actual: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
    assert_eq!(actual["level"], "DEBUG");
    assert_eq!(actual["msg"], "cache warmed in 12ms");
    assert_eq!(actual["source"]["file"], "tests/logger.rs");
    assert!(actual["source"]["line"].as_u64().unwrap() > 0);
}

#[test]
fn test_key_values_in_every_format() {
    let kvs = [("user", "alice")];
    for (format, expected) in [
        (Format::Pretty, "user=\x1b[0malice"),
        (Format::Json, "\"user\":\"alice\""),
        (Format::Logfmt, " user=alice"),
    ] {
        let buf = SharedBuf::default();
        let l = ctxlog::new(buf.clone(), format, false);
        l.log(
            &Record::builder()
                .args(format_args!("signed in"))
                .level(Level::Warn)
                .key_values(&kvs)
                .build(),
        );
        let contents = buf.contents();
        assert!(contents.contains(expected), "{format}: {contents}");
    }
}

#[test]
fn test_parse_tokens() {
    let mut f = Format::default();
    f.parse_into("json").unwrap();
    assert_eq!(f, Format::Json);
    f.parse_into("pretty").unwrap();
    assert_eq!(f, Format::Pretty);
    f.parse_into("logfmt").unwrap();
    assert_eq!(f, Format::Logfmt);

    let err = f.parse_into("invalid").unwrap_err();
    assert_eq!(err.kind(), ctxlog::ErrorKind::InvalidFormat);
    assert_eq!(f, Format::Logfmt);
}

#[test]
fn test_parse_random_tokens() {
    let mut rng = rand::rng();
    for _ in 0..100 {
        let len = rng.random_range(0..12);
        let token: String = (&mut rng)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        if matches!(token.as_str(), "pretty" | "json" | "logfmt") {
            continue;
        }

        let mut f = Format::Json;
        assert!(f.parse_into(&token).is_err(), "{token:?}");
        assert_eq!(f, Format::Json);
    }
}

#[test]
fn test_file_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let file = std::fs::File::create(&path).unwrap();

    let l = ctxlog::new(file, Format::Logfmt, false);
    ctxlog::warn!(l, "low disk");
    ctxlog::error!(l, "disk full");
    l.flush();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("level=WARN msg=\"low disk\""));
    assert!(lines[1].ends_with("level=ERROR msg=\"disk full\""));
}
