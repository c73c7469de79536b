//! Kitchen Simulation Library
//!
//! Core of a restaurant-kitchen training simulator that can run headless or
//! behind any UI.

pub mod simulation;
