// Session state machine and its clock

pub mod clock;
pub mod engine;

pub use clock::{ClockTick, ModeClock};
pub use engine::SessionEngine;
