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

/// Log a message through a [`Logger`](crate::Logger) at the given level.
///
/// The call site is recorded; whether it is printed depends on the logger.
///
/// ```
/// use ctxlog::Format;
/// use log::Level;
///
/// let logger = ctxlog::new(std::io::stdout(), Format::Pretty, false);
/// ctxlog::log!(logger, Level::Warn, "disk at {}%", 91);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $lvl:expr, $($arg:tt)+) => {
        $crate::__private::log(
            &$logger,
            $lvl,
            format_args!($($arg)+),
            &(module_path!(), file!(), line!()),
        )
    };
}

/// Log a message at the error level.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::__private::Level::Error, $($arg)+)
    };
}

/// Log a message at the warn level.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::__private::Level::Warn, $($arg)+)
    };
}

/// Log a message at the info level.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::__private::Level::Info, $($arg)+)
    };
}

/// Log a message at the debug level.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::__private::Level::Debug, $($arg)+)
    };
}

/// Log a message at the trace level.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::__private::Level::Trace, $($arg)+)
    };
}
