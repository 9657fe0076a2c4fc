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

//! Logger propagation for [tonic](https://docs.rs/tonic) services and clients.
//!
//! tonic runs unary and streaming calls, on both the server and the client, through the same
//! [`Interceptor`] hook, so a single [`LoggerInterceptor`] covers all four. The logger travels in
//! the request extensions.
//!
//! ```
//! use ctxlog::Format;
//! use ctxlog::rpc::tonic::LoggerInterceptor;
//! use tonic::service::Interceptor;
//!
//! let logger = ctxlog::new(std::io::stderr(), Format::Json, false);
//! let mut interceptor = LoggerInterceptor::new(logger.clone());
//!
//! let request = interceptor.call(tonic::Request::new(())).unwrap();
//! assert_eq!(ctxlog::rpc::tonic::from_request(&request), &logger);
//! ```

use ::tonic::Extensions;
use ::tonic::Request;
use ::tonic::Status;
use ::tonic::service::Interceptor;

use crate::Logger;
use crate::default_logger;

#[derive(Clone)]
struct LoggerExtension(Logger);

/// A tonic [`Interceptor`] that inserts a logger into every request's extensions.
#[derive(Debug, Clone)]
pub struct LoggerInterceptor {
    logger: Logger,
}

impl LoggerInterceptor {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl Interceptor for LoggerInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .extensions_mut()
            .insert(LoggerExtension(self.logger.clone()));
        Ok(request)
    }
}

/// The logger inserted by [`LoggerInterceptor`], or the [default logger](default_logger).
pub fn from_extensions(extensions: &Extensions) -> &Logger {
    extensions
        .get::<LoggerExtension>()
        .map(|ext| &ext.0)
        .unwrap_or_else(|| default_logger())
}

/// Shorthand for [`from_extensions`] on a request.
pub fn from_request<T>(request: &Request<T>) -> &Logger {
    from_extensions(request.extensions())
}
