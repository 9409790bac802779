//! The Council: roster, round entities, refinement loop entities,
//! progress events and structured decoding.

pub mod entities;
pub mod parsing;
pub mod progress;
pub mod refinement;
pub mod roster;
