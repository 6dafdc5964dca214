//! Scoped conversion context.
//!
//! Function fields sometimes need information that is neither on the
//! object nor on the schema, such as a tenant id or a display suffix.
//! [`Context`] provides a thread-local stack of values scoped by an RAII
//! guard; field closures read the innermost value with
//! [`Context::current`].
//!
//! The context is per-thread. Conversions fanned out by
//! [`load_many`](crate::Schema::load_many) run on worker threads and do
//! not observe the caller's context.
//!
//! # Example
//!
//! ```rust
//! use alembic::fields::FunctionField;
//! use alembic::{Context, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new().field(
//!     "name_suffixed",
//!     FunctionField::new(|obj| {
//!         let suffix = Context::current()
//!             .and_then(|c| c["suffix"].as_str().map(String::from))
//!             .unwrap_or_default();
//!         Ok(json!(format!("{}{}", obj["name"].as_str().unwrap_or(""), suffix)))
//!     }),
//! );
//!
//! let _guard = Context::scope(json!({"suffix": "bar"}));
//! let out = schema.dump(&json!({"name": "foo"})).into_result().unwrap();
//! assert_eq!(out["name_suffixed"], json!("foobar"));
//! ```

use std::cell::RefCell;

use serde_json::Value;

thread_local! {
    static CONTEXT_STACK: RefCell<Vec<Value>> = const { RefCell::new(Vec::new()) };
}

/// Entry point for setting and reading the scoped context.
pub struct Context;

impl Context {
    /// Pushes `value` as the current context for the lifetime of the
    /// returned guard.
    ///
    /// Scopes nest; the innermost live scope wins.
    #[must_use = "the context is popped when the guard drops"]
    pub fn scope(value: Value) -> ContextGuard {
        CONTEXT_STACK.with(|stack| stack.borrow_mut().push(value));
        ContextGuard { _private: () }
    }

    /// The innermost context value, or `None` when no scope is active.
    pub fn current() -> Option<Value> {
        CONTEXT_STACK.with(|stack| stack.borrow().last().cloned())
    }
}

/// Pops its context scope when dropped.
pub struct ContextGuard {
    _private: (),
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CONTEXT_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}
