//! Configuration discovery, loading and layering.

mod discovery;
mod loader;
mod merge;
mod resolve;
mod types;

pub use discovery::{CONFIG_FILE_STEM, config_file_names, config_path};
pub use loader::{
    CONFIG_FORMATS, ConfigFormat, ConfigLoader, JsonLoader, NODE_ENV, ScriptLoader, TS_LOADER_ENV,
    import_config_from_path, supports_strip_types,
};
pub use merge::{merge_deep, merge_layers};
pub use resolve::{LoadConfigInput, load_config};
pub use types::{AwsConfig, Config, DEFAULT_PROD_ENV_NAME};
