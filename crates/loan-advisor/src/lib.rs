//! Loan case evaluation front end: form intake, payload shaping, the remote evaluation
//! call, and rendering of the returned risk flags, suggestions, and bank matches.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod telemetry;
