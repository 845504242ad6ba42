use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No identity event observed yet
    #[default]
    Initializing,
    /// Identity known, profile resolution in flight
    Loading,
    Ready,
    SignedOut,
    /// Profile resolution failed terminally
    Errored,
}
