pub mod cluster_config;
pub mod config_builder;
pub mod config_map;
pub mod console_plugin;
pub mod console_server_config;
pub mod constants;
pub mod context_data;
pub mod controller_console;
pub mod model;
pub mod operator_config;
pub mod operator_console;
pub mod route;
pub mod utils;
pub mod yaml_merger;
