// Domain layer: response envelope, process specs and the ports the launcher drives.

pub mod model;
pub mod ports;
