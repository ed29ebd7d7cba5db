//! Graph model and instance file handling

pub mod model;
pub mod io;

pub use model::{Edge, Graph, MAX_VERTICES};
pub use io::{create_example_instances, load_instance, parse_instance, save_instance, Instance};
