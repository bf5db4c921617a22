//! Thin command-line glue over the `edgectl` core library. Every
//! subcommand maps 1:1 onto a core operation and only formats its result.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
