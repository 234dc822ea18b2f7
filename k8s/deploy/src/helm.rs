/// Contains the structs required to deserialize the Chart.yaml of a helm chart.
pub(crate) mod chart;

/// Contains the tools to run helm commands.
pub(crate) mod client;

/// Contains the values overlay files passed to helm.
pub(crate) mod values;
