// Domain layer: core models and ports (interfaces). No transport or provider specifics here.

pub mod model;
pub mod ports;
