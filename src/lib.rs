//! Ringfield - a turn-based tactics core
//!
//! A circular arena grid with biomes and elevation, per-team fog of war,
//! A* movement with opportunity-attack risk, and d20 combat resolved through
//! additive modifier stacks. The core is headless: rendering, input, and UI
//! are collaborators that listen to the event log.

pub mod actions;
pub mod ai;
pub mod combat;
pub mod core;
pub mod data;
pub mod events;
pub mod grid;
pub mod pathfinding;
pub mod sight;
pub mod skirmish;
pub mod stats;
pub mod territory;
pub mod turn;
pub mod unit;
