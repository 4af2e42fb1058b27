pub mod screens;
pub mod site;

pub use site::{Site, Visit};
