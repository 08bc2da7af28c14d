//! Synthetic record generator for the busy-writer load generator.
//!
//! Produces one plausible, email-like description per call from a seeded RNG,
//! so a run can be reproduced by reusing its seed.
//!
//! # Example
//!
//! ```rust
//! use record_generator::RecordGenerator;
//!
//! let mut generator = RecordGenerator::new(42);
//! let record = generator.next_record();
//! assert!(record.description.contains('@'));
//! assert_eq!(record.status, "idle");
//! ```
//!
//! # Pattern placeholders
//!
//! - `{index}` - row index
//! - `{first}` / `{last}` - random first / last name, lowercase
//! - `{word}` - random lowercase word
//! - `{domain}` - random mail domain
//! - `{rand:N}` - random N-digit number

pub mod generator;
pub mod pattern;

pub use generator::{RecordGenerator, DEFAULT_PATTERN, MAX_DESCRIPTION_LEN};
