//! SSM Parameter Store access.

mod collection;
mod params;
mod store;

pub use collection::ParameterCollection;
pub use params::{build_path, extract_param_value};
pub use store::{Parameter, ParameterStore, SsmParameterStore};
