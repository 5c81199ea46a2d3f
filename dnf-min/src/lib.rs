// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimizes single-output boolean functions, given as truth tables, into a sum of products.
//!
//! Implicants are merged Quine-McCluskey style until only prime implicants remain, then a
//! brute-force search drops as many of them as possible while still covering every `1` row.
//!
//! ```
//! use dnf_min::minimizer::Minimizer;
//!
//! let mut minimizer = Minimizer::new("0111").unwrap();
//! minimizer.minimize().unwrap();
//! assert_eq!(minimizer.terms().to_string(), "ab\n-1\n1-\n");
//! assert_eq!(minimizer.terms().algebraic().to_string(), "a + b");
//! ```

pub mod errors;
pub mod implicant;
pub mod minimizer;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
pub mod truth_table;
