pub(crate) mod chart;
pub(crate) mod data;
pub(crate) mod progress;
