// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Mathbench (config, prefs).
//! Keeps panels and the CLI shell storage-agnostic.

pub mod config;
pub mod config_port;
pub mod prefs;
