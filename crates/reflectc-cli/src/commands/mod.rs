// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Command implementations for the `reflectc` CLI.

pub mod build;
pub mod check;
