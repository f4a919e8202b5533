//! Work-unit lifecycle states

mod unit_state;

pub use unit_state::UnitState;
