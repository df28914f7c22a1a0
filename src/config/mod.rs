mod defaults;
mod loader;

pub use defaults::{CONFIG_SECTION, DEFAULT_GATEWAY_URL, QueryConfig};
pub use loader::{get_default_config, load_configuration, load_query_config, write_config_to};
