// Domain layer: cart models and the ports the cart engine talks through.

pub mod model;
pub mod ports;
