//! Tallypad: a keypad calculator with a persistent calculation log.
//!
//! Two loosely-coupled halves:
//!
//! - [`calc`]: the keypad state machine. Owns all arithmetic interaction
//!   logic and emits persistence commands instead of doing I/O.
//! - [`db`] + [`api`]: the calculation log service. Appends completed
//!   calculations to SQLite and answers ordered/limited reads over JSON HTTP.
//!
//! [`client`] is the pad's path to the service, and [`pad`] wires the two
//! halves together into an interactive console session.

pub mod api;
pub mod calc;
pub mod client;
pub mod db;
pub mod models;
pub mod pad;
