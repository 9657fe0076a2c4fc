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

//! RPC interceptors that attach a logger to every call's [`Context`].
//!
//! Each interceptor takes the same arguments, in the same order, as the middleware hook it is
//! registered at, and hands them on unchanged except for the context. Handlers retrieve the
//! logger with [`from_context`](crate::from_context).
//!
//! # Examples
//!
//! ```
//! use ctxlog::Context;
//! use ctxlog::Format;
//! use ctxlog::rpc::UnaryServerInfo;
//!
//! let logger = ctxlog::new(std::io::stderr(), Format::Json, false);
//! let interceptor = ctxlog::rpc::unary_server_interceptor(logger.clone());
//!
//! let info = UnaryServerInfo::new("/echo.Echo/Say");
//! let reply = interceptor.intercept(Context::background(), "hi", &info, |ctx, req| {
//!     ctxlog::info!(ctxlog::from_context(&ctx), "saying {req}");
//!     Ok::<_, String>(req.to_uppercase())
//! });
//! assert_eq!(reply.unwrap(), "HI");
//! ```

use std::collections::BTreeMap;

use crate::Context;

mod interceptor;
mod stream;
#[cfg(feature = "tonic")]
pub mod tonic;

pub use self::interceptor::StreamClientInterceptor;
pub use self::interceptor::StreamServerInterceptor;
pub use self::interceptor::UnaryClientInterceptor;
pub use self::interceptor::UnaryServerInterceptor;
pub use self::interceptor::stream_client_interceptor;
pub use self::interceptor::stream_server_interceptor;
pub use self::interceptor::unary_client_interceptor;
pub use self::interceptor::unary_server_interceptor;
pub use self::stream::WrappedServerStream;

/// Header or trailer metadata: lowercase keys, each with one or more values.
pub type Metadata = BTreeMap<String, Vec<String>>;

/// Information about a unary call, as seen by a server interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryServerInfo {
    /// The full method name, `/package.Service/Method`.
    pub full_method: String,
}

impl UnaryServerInfo {
    /// Create the info for `full_method`.
    pub fn new(full_method: impl Into<String>) -> Self {
        Self {
            full_method: full_method.into(),
        }
    }
}

/// Information about a streaming call, as seen by a server interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamServerInfo {
    /// The full method name, `/package.Service/Method`.
    pub full_method: String,
    /// Whether the client streams requests.
    pub is_client_stream: bool,
    /// Whether the server streams responses.
    pub is_server_stream: bool,
}

/// Describes a streaming method to a client interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDesc {
    /// The method name without the service prefix.
    pub stream_name: String,
    /// Whether the server streams responses.
    pub server_streams: bool,
    /// Whether the client streams requests.
    pub client_streams: bool,
}

/// The server side of a streaming call.
///
/// Streaming handlers do not receive a context argument; they read it from the stream.
pub trait ServerStream {
    /// Messages received from the client.
    type Request;
    /// Messages sent to the client.
    type Response;
    /// The error of failed stream operations.
    type Error;

    /// Set header metadata, merged with earlier calls and sent with the first response.
    fn set_header(&mut self, md: Metadata) -> Result<(), Self::Error>;

    /// Send header metadata immediately.
    fn send_header(&mut self, md: Metadata) -> Result<(), Self::Error>;

    /// Set trailer metadata, sent when the call completes.
    fn set_trailer(&mut self, md: Metadata);

    /// The context of this call.
    fn context(&self) -> &Context;

    /// Send a message to the client.
    fn send_msg(&mut self, msg: Self::Response) -> Result<(), Self::Error>;

    /// Receive the next message; `Ok(None)` at end of stream.
    fn recv_msg(&mut self) -> Result<Option<Self::Request>, Self::Error>;
}
