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

//! Output format selection.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::Error;
use crate::layout::JsonLayout;
use crate::layout::Layout;
use crate::layout::LogfmtLayout;
use crate::layout::PrettyLayout;

/// The output encoding of a [`Logger`](crate::Logger).
///
/// Parse it from a configuration string with [`FromStr`]:
///
/// ```
/// use ctxlog::Format;
///
/// let format: Format = "json".parse().unwrap();
/// assert_eq!(format, Format::Json);
/// assert!("JSON".parse::<Format>().is_err());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Format {
    /// Colorized, human-friendly text.
    #[default]
    Pretty = 0,
    /// One JSON object per line.
    Json = 1,
    /// Logfmt (`key=value`) pairs.
    Logfmt = 2,
}

impl Format {
    /// Parse `text` into `self`.
    ///
    /// On error `self` is left untouched.
    pub fn parse_into(&mut self, text: &str) -> Result<(), Error> {
        *self = text.parse()?;
        Ok(())
    }

    /// The token this format parses from.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Pretty => "pretty",
            Format::Json => "json",
            Format::Logfmt => "logfmt",
        }
    }

    /// Create the layout that encodes records in this format.
    ///
    /// `with_source` turns on the `file:line` call-site annotation.
    pub fn layout(self, with_source: bool) -> Box<dyn Layout> {
        match self {
            Format::Logfmt => Box::new(LogfmtLayout::default().with_source(with_source)),
            Format::Json => Box::new(JsonLayout::default().with_source(with_source)),
            Format::Pretty => Box::new(PrettyLayout::default().with_source(with_source)),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Format::Pretty),
            "json" => Ok(Format::Json),
            "logfmt" => Ok(Format::Logfmt),
            _ => Err(Error::invalid_format(s)),
        }
    }
}

/// Lenient conversion: values other than 0, 1 and 2 fall back to [`Format::Pretty`].
impl From<u8> for Format {
    fn from(value: u8) -> Self {
        match value {
            1 => Format::Json,
            2 => Format::Logfmt,
            _ => Format::Pretty,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Format {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Format {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_parse_known_tokens() {
        assert_eq!("pretty".parse::<Format>().unwrap(), Format::Pretty);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("logfmt".parse::<Format>().unwrap(), Format::Logfmt);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        for token in ["Pretty", "JSON", "LogFmt", "", " json", "text"] {
            let err = token.parse::<Format>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "token {token:?}");
        }
    }

    #[test]
    fn test_parse_into_keeps_value_on_error() {
        let mut format = Format::Logfmt;
        let err = format.parse_into("invalid").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(format, Format::Logfmt);

        format.parse_into("json").unwrap();
        assert_eq!(format, Format::Json);
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(Format::from(0), Format::Pretty);
        assert_eq!(Format::from(1), Format::Json);
        assert_eq!(Format::from(2), Format::Logfmt);
        assert_eq!(Format::from(255), Format::Pretty);
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&Format::Logfmt).unwrap(), "\"logfmt\"");
        let format: Format = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, Format::Json);
        assert!(serde_json::from_str::<Format>("\"xml\"").is_err());
    }
}
