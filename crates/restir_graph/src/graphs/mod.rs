// SPDX-License-Identifier: MIT OR Apache-2.0
//! Concrete render graphs built on the core model.

pub mod rtxdi;
