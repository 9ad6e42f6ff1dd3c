mod configs;
mod deadzones;
mod diagnostics;
mod drift;
mod gilrs_specific;
mod match_event;
mod math_ops;
mod report;
mod utils;

use color_eyre::eyre::Result;
use env_logger::{Builder, Env};
use log::debug;

use crate::configs::Configs;
use crate::gilrs_specific::run_monitor_loop;

fn init_monitor() -> Result<()> {
    let configs = Configs::load()?;

    let default_level = match configs.debug {
        true => "debug",
        false => "warn",
    };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format_module_path(false)
        .format_target(false)
        .format_indent(None)
        .format_timestamp(None)
        .init();

    debug!(
        "Tick: {}ms; Reconnect: {}ms",
        configs.tick_interval_ms, configs.reconnect_interval_ms
    );

    run_monitor_loop(configs)
}

fn main() -> Result<()> {
    color_eyre::install()?;

    init_monitor()
}
