//! Tooling primitives for deterministic game AI.
//!
//! Engine-agnostic trace recording: the scheduler and navigation scripts emit small events into
//! an agent's blackboard, and tests or debug front-ends read them back.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{emit, TraceEvent, TraceLog, TraceSink, TRACE_LOG, TRACE_SINK};
