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

//! Request-scoped context propagation.
//!
//! # Examples
//!
//! ```
//! use ctxlog::Context;
//! use ctxlog::Format;
//!
//! let logger = ctxlog::new(std::io::stderr(), Format::Logfmt, false);
//! let ctx = ctxlog::with_logger(&Context::background(), logger.clone());
//!
//! assert_eq!(ctxlog::from_context(&ctx), &logger);
//! assert_eq!(
//!     ctxlog::from_context(&Context::background()),
//!     ctxlog::default_logger()
//! );
//! ```

use std::any::Any;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::Logger;
use crate::default_logger;

/// An immutable, chainable key-value carrier.
///
/// Deriving a context with [`Context::with_value`] never changes the context it was derived from;
/// every holder of the original keeps seeing the original entries. Keys are types, so entries
/// keyed by a private type cannot collide with anyone else's.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Entry>>,
}

struct Entry {
    key: TypeId,
    value: Box<dyn Any + Send + Sync>,
    parent: Option<Arc<Entry>>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("entries", &self.len())
            .finish()
    }
}

impl Context {
    /// The empty root context.
    pub fn background() -> Context {
        Context::default()
    }

    /// Derive a context that additionally maps the key type `K` to `value`.
    ///
    /// An existing entry for `K` is shadowed in the derived context only.
    pub fn with_value<K, V>(&self, value: V) -> Context
    where
        K: 'static,
        V: Send + Sync + 'static,
    {
        Context {
            head: Some(Arc::new(Entry {
                key: TypeId::of::<K>(),
                value: Box::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up the newest entry keyed by `K`.
    ///
    /// Returns `None` if there is no such entry or if it does not hold a `V`.
    pub fn value<K, V>(&self) -> Option<&V>
    where
        K: 'static,
        V: 'static,
    {
        let key = TypeId::of::<K>();
        let mut entry = self.head.as_deref();
        while let Some(e) = entry {
            if e.key == key {
                return e.value.downcast_ref::<V>();
            }
            entry = e.parent.as_deref();
        }
        None
    }

    fn len(&self) -> usize {
        let mut n = 0;
        let mut entry = self.head.as_deref();
        while let Some(e) = entry {
            n += 1;
            entry = e.parent.as_deref();
        }
        n
    }
}

struct LoggerKey;

/// Derive a context carrying `logger`.
pub fn with_logger(ctx: &Context, logger: Logger) -> Context {
    ctx.with_value::<LoggerKey, Logger>(logger)
}

/// The logger attached to `ctx`, or the [default logger](default_logger) if there is none.
pub fn from_context(ctx: &Context) -> &Logger {
    ctx.value::<LoggerKey, Logger>()
        .unwrap_or_else(|| default_logger())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::Format;

    struct RequestId;

    #[test]
    fn test_value_lookup() {
        let root = Context::background();
        let ctx = root.with_value::<RequestId, _>("req-1".to_string());
        let child = ctx.with_value::<RequestId, _>("req-2".to_string());

        assert_eq!(root.value::<RequestId, String>(), None);
        assert_eq!(ctx.value::<RequestId, String>().unwrap(), "req-1");
        assert_eq!(child.value::<RequestId, String>().unwrap(), "req-2");
        assert_eq!(child.value::<RequestId, u64>(), None);
        assert_eq!(child.len(), 2);
    }

    #[test]
    fn test_logger_keys_do_not_collide() {
        let logger = crate::new(io::sink(), Format::Json, false);
        let ctx = with_logger(&Context::background(), logger.clone())
            .with_value::<RequestId, _>(7u64);

        assert_eq!(from_context(&ctx), &logger);
        assert_eq!(ctx.value::<RequestId, u64>(), Some(&7));
    }

    #[test]
    fn test_missing_logger_resolves_to_default() {
        let ctx = Context::background().with_value::<RequestId, _>(7u64);
        assert!(from_context(&ctx).ptr_eq(default_logger()));
    }

    #[test]
    fn test_attach_does_not_alter_original() {
        let first = crate::new(io::sink(), Format::Pretty, false);
        let second = crate::new(io::sink(), Format::Logfmt, true);

        let root = Context::background();
        let ctx = with_logger(&root, first.clone());
        let derived = with_logger(&ctx, second.clone());

        assert_eq!(from_context(&root), default_logger());
        assert_eq!(from_context(&ctx), &first);
        assert_eq!(from_context(&derived), &second);
    }
}
