// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Library surface of the `reflectc` command-line interface.
//!
//! Exposes the command implementations so integration tests can drive the
//! full pipeline without spawning the binary.

pub mod commands;
pub mod diagnostic;
