//! Guardrail Gate: the synchronous response-risk check.
//!
//! Sits in the request path between candidate generation and delivery.
//! Runs the well-being check (external VAD estimate vs fixed thresholds)
//! and the manipulation check (static phrase set) in severity order,
//! short-circuiting; substitutes a pre-approved fallback utterance and
//! emits an alert when either fires. Fails closed on any internal error.

mod gate;

pub use gate::{GateDecision, GuardrailGate, ResponseContext};
