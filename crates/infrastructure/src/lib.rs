//! rootwalk infrastructure: UDP wire exchange and the in-memory resolution cache
pub mod dns;
