pub mod gnosis;
pub mod sheets;
