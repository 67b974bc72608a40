// Domain layer: customer records, audit results, field rules and ports (interfaces).
// No I/O here; adapters live under src/config and the pipeline under src/core.

pub mod model;
pub mod ports;
pub mod rules;
