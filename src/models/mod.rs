//! Domain models: slop documents and entity mentions.

mod entity;
mod slop;

pub use entity::{EntityLabel, EntityMention};
pub use slop::Slop;
