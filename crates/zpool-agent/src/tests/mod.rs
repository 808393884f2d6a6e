//! Unit tests for the agent's handlers and runtime.
//!
//! The pool tool is replaced by a `mockall` double; an unmet expectation
//! fails the test, so every test also pins down which tool invocations an
//! action makes.

mod runtime;
mod support;
