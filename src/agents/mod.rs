pub mod command_runner;
pub mod host_info;
