// Domain layer: records, the document aggregate and the storage port. Only std/serde here.

pub mod model;
pub mod ports;
