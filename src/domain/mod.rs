// Domain layer: anagram data types and ports (interfaces) to the outside world.

pub mod model;
pub mod ports;
