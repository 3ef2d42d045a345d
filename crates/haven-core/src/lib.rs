//! haven-core
//!
//! Pure domain types for the Haven assessment: therapy areas, questions,
//! answers and ranked recommendations. No scoring logic lives here — this is
//! the shared vocabulary the engine and its front ends agree on.

pub mod error;
pub mod models;
