//! The keypad state machine.
//!
//! All arithmetic interaction logic lives here: digit entry, pending-operator
//! handling, chained evaluation, and display formatting. The machine is a
//! plain state struct with a synchronous transition function; no UI, no I/O.
//! Side effects surface as [`Command`] values for the caller to dispatch, so
//! the whole machine is deterministic and unit-testable offline.

mod format;
mod keypad;

pub use format::{format_number, round_result};
pub use keypad::{ArithmeticError, Command, Key, Keypad, Operator, ERROR_DISPLAY};
