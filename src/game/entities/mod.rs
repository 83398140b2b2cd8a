//! Game entities module.
//!
//! This module organizes per-player bookkeeping.

pub mod player;
