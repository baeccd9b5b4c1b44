//! Integration Tests Module
//!
//! End-to-end checks across the workspace crates: raw answers through the
//! chart pipeline, spec synthesis of accepted charts, and full question
//! flows through the demo transport.

// Raw chart payloads through parse, validate, normalize and fallback
mod pipeline_test;

// Accepted charts through the synthesizer
mod synthesis_test;

// Questions through AppState with the demo transport
mod chat_flow_test;
