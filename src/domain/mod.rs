// Domain layer: request/blob models and the ports the inserter depends on.

pub mod model;
pub mod ports;
