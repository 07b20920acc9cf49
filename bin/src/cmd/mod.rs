//! CLI subcommand modules.
//!
//! This module contains the implementations for all displacement CLI subcommands.

pub(crate) mod compute;
pub(crate) mod earnings;
pub(crate) mod show;
pub(crate) mod signals;
