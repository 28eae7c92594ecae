//! Business services orchestrating the database layer

pub mod cards;
pub mod notify;
pub mod tags;
pub mod wip;
