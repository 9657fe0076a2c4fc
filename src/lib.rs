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

//! ctxlog builds loggers with pretty, JSON or logfmt output and carries them through
//! request-scoped [`Context`]s.
//!
//! # Overview
//!
//! A [`Logger`] is an immutable handle bound to one sink, one output [`Format`] and one level
//! threshold. Attach it to a [`Context`] with [`with_logger`], and get it back anywhere down the
//! call chain with [`from_context`], which falls back to the [`default_logger`] when nothing was
//! attached. The [`rpc`] interceptors do the attaching for every RPC call.
//!
//! # Examples
//!
//! ```
//! use ctxlog::Context;
//! use ctxlog::Format;
//!
//! let format: Format = "logfmt".parse().unwrap();
//! let logger = ctxlog::new(std::io::stdout(), format, false);
//!
//! let ctx = ctxlog::with_logger(&Context::background(), logger);
//! handle(&ctx);
//!
//! fn handle(ctx: &Context) {
//!     let logger = ctxlog::from_context(ctx);
//!     ctxlog::info!(logger, "handling request");
//!     ctxlog::debug!(logger, "not emitted unless verbose");
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod layout;
pub mod rpc;

mod context;
mod error;
mod format;
mod logger;
mod macros;

pub use self::append::Append;
pub use self::context::Context;
pub use self::context::from_context;
pub use self::context::with_logger;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::format::Format;
pub use self::layout::Layout;
pub use self::logger::Builder;
pub use self::logger::Logger;
pub use self::logger::builder;
pub use self::logger::default_logger;
pub use self::logger::new;

#[doc(hidden)]
pub mod __private {
    use std::fmt;

    pub use ::log::Level;

    use crate::Logger;

    pub fn log(
        logger: &Logger,
        level: Level,
        args: fmt::Arguments,
        &(module_path, file, line): &(&'static str, &'static str, u32),
    ) {
        if !logger.enabled_at(level) {
            return;
        }

        ::log::Log::log(
            logger,
            &::log::Record::builder()
                .args(args)
                .level(level)
                .target(module_path)
                .module_path_static(Some(module_path))
                .file_static(Some(file))
                .line(Some(line))
                .build(),
        );
    }
}
