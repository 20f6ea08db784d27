pub mod get_config_value;
pub mod shutdown_signal;
