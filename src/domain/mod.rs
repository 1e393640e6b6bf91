// Domain layer: the Bible corpus, schedule rows and the ports the pipeline is built on.

pub mod model;
pub mod ports;
