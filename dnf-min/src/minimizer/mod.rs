// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod caches;
mod display;
mod minimizer_impl;
mod options;
mod search;

pub use display::*;
pub use minimizer_impl::*;
pub use options::*;
