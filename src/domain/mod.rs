// Domain layer: wire models, resource requests and the ports the core layer
// depends on.

pub mod model;
pub mod ports;
pub mod resource;
