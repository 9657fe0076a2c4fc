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

use crate::Context;
use crate::Logger;
use crate::rpc::ServerStream;
use crate::rpc::StreamDesc;
use crate::rpc::StreamServerInfo;
use crate::rpc::UnaryServerInfo;
use crate::rpc::WrappedServerStream;
use crate::with_logger;

/// Create a unary server interceptor that attaches `logger` to the call context.
pub fn unary_server_interceptor(logger: Logger) -> UnaryServerInterceptor {
    UnaryServerInterceptor { logger }
}

/// Create a stream server interceptor that attaches `logger` to the stream context.
pub fn stream_server_interceptor(logger: Logger) -> StreamServerInterceptor {
    StreamServerInterceptor { logger }
}

/// Create a unary client interceptor that attaches `logger` to the outgoing context.
pub fn unary_client_interceptor(logger: Logger) -> UnaryClientInterceptor {
    UnaryClientInterceptor { logger }
}

/// Create a stream client interceptor that attaches `logger` to the outgoing context.
pub fn stream_client_interceptor(logger: Logger) -> StreamClientInterceptor {
    StreamClientInterceptor { logger }
}

/// See [`unary_server_interceptor`].
#[derive(Debug, Clone)]
pub struct UnaryServerInterceptor {
    logger: Logger,
}

impl UnaryServerInterceptor {
    /// Call `handler` with a context carrying the logger, returning whatever it returns.
    pub fn intercept<Req, R, H>(
        &self,
        ctx: Context,
        req: Req,
        _info: &UnaryServerInfo,
        handler: H,
    ) -> R
    where
        H: FnOnce(Context, Req) -> R,
    {
        handler(with_logger(&ctx, self.logger.clone()), req)
    }
}

/// See [`stream_server_interceptor`].
#[derive(Debug, Clone)]
pub struct StreamServerInterceptor {
    logger: Logger,
}

impl StreamServerInterceptor {
    /// Call `handler` with `stream` wrapped so that its context carries the logger.
    pub fn intercept<Srv, S, R, H>(
        &self,
        srv: Srv,
        stream: S,
        _info: &StreamServerInfo,
        handler: H,
    ) -> R
    where
        S: ServerStream,
        H: FnOnce(Srv, WrappedServerStream<S>) -> R,
    {
        let ctx = with_logger(stream.context(), self.logger.clone());
        handler(srv, WrappedServerStream::new(stream, ctx))
    }
}

/// See [`unary_client_interceptor`].
#[derive(Debug, Clone)]
pub struct UnaryClientInterceptor {
    logger: Logger,
}

impl UnaryClientInterceptor {
    /// Call `invoker` with a context carrying the logger; every other argument is passed through.
    pub fn intercept<'a, Req, C, O, R, I>(
        &self,
        ctx: Context,
        method: &'a str,
        req: Req,
        conn: &'a C,
        invoker: I,
        opts: O,
    ) -> R
    where
        C: ?Sized,
        I: FnOnce(Context, &'a str, Req, &'a C, O) -> R,
    {
        invoker(with_logger(&ctx, self.logger.clone()), method, req, conn, opts)
    }
}

/// See [`stream_client_interceptor`].
#[derive(Debug, Clone)]
pub struct StreamClientInterceptor {
    logger: Logger,
}

impl StreamClientInterceptor {
    /// Call `streamer` with a context carrying the logger; every other argument is passed through.
    pub fn intercept<'a, C, O, R, S>(
        &self,
        ctx: Context,
        desc: &'a StreamDesc,
        conn: &'a C,
        method: &'a str,
        streamer: S,
        opts: O,
    ) -> R
    where
        C: ?Sized,
        S: FnOnce(Context, &'a StreamDesc, &'a C, &'a str, O) -> R,
    {
        let ctx = with_logger(&ctx, self.logger.clone());
        streamer(ctx, desc, conn, method, opts)
    }
}
