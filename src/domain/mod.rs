// Domain layer: backend entity shapes and the ports the core talks through.

pub mod model;
pub mod ports;
