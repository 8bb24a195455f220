pub mod models;
mod transform;

pub use transform::attributes_to_map;
