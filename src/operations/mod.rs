pub mod modification;
pub mod transform;
