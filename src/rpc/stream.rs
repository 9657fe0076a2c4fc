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

use std::ops::Deref;
use std::ops::DerefMut;

use crate::Context;
use crate::rpc::Metadata;
use crate::rpc::ServerStream;

/// A [`ServerStream`] that reports its own context and forwards everything else to the wrapped
/// stream.
///
/// Inherent methods of the wrapped stream stay reachable through [`Deref`].
#[derive(Debug)]
pub struct WrappedServerStream<S> {
    inner: S,
    ctx: Context,
}

impl<S> WrappedServerStream<S> {
    /// Wrap `inner`, reporting `ctx` as its context.
    pub fn new(inner: S, ctx: Context) -> Self {
        Self { inner, ctx }
    }

    /// Unwrap the original stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> Deref for WrappedServerStream<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.inner
    }
}

impl<S> DerefMut for WrappedServerStream<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.inner
    }
}

impl<S: ServerStream> ServerStream for WrappedServerStream<S> {
    type Request = S::Request;
    type Response = S::Response;
    type Error = S::Error;

    fn set_header(&mut self, md: Metadata) -> Result<(), S::Error> {
        self.inner.set_header(md)
    }

    fn send_header(&mut self, md: Metadata) -> Result<(), S::Error> {
        self.inner.send_header(md)
    }

    fn set_trailer(&mut self, md: Metadata) {
        self.inner.set_trailer(md)
    }

    fn context(&self) -> &Context {
        &self.ctx
    }

    fn send_msg(&mut self, msg: S::Response) -> Result<(), S::Error> {
        self.inner.send_msg(msg)
    }

    fn recv_msg(&mut self) -> Result<Option<S::Request>, S::Error> {
        self.inner.recv_msg()
    }
}
