pub mod convert;
pub mod expand;
pub mod rule;
pub mod zones;
