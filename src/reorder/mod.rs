//! Reorder engine: visiting orders that minimize idle pen travel

mod engine;
mod strategy;

pub use engine::{order, travel, Visit};
pub use strategy::{Strategy, UnknownStrategy};
