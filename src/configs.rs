use std::env::current_dir;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{OptionExt, Result};
use serde::Deserialize;

const PROJECT_NAME: &str = "gamepad_doctor";

pub fn last_path_component(path: &Path) -> Result<&str> {
    Ok(path
        .components()
        .next_back()
        .ok_or_eyre("Cannot get the last component of the path")?
        .as_os_str()
        .to_str()
        .ok_or_eyre("Cannot convert to str")?)
}

pub fn get_project_dir() -> Result<PathBuf> {
    let mut cur_dir = current_dir()?;
    while last_path_component(cur_dir.as_path())? != PROJECT_NAME {
        cur_dir = cur_dir
            .parent()
            .ok_or_eyre("Cannot get parent directory")?
            .to_path_buf();
    }
    Ok(cur_dir)
}

pub fn read_yaml<T, P, S>(folder: P, filename: S) -> Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
    S: AsRef<str>,
{
    const EXTENSION: &str = ".yaml";
    let mut filename = filename.as_ref().to_string();
    if !filename.ends_with(EXTENSION) {
        filename += EXTENSION
    }

    let filepath = folder.as_ref().join(filename);
    let file_content = read_to_string(filepath)?;
    let decoded_obj = serde_yml::from_str(file_content.as_str())?;
    Ok(decoded_obj)
}

fn default_tick_interval_ms() -> u64 {
    16
}

fn default_reconnect_interval_ms() -> u64 {
    5000
}

#[derive(Deserialize, Clone, Debug)]
pub struct Configs {
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_reconnect_interval_ms")]
    pub reconnect_interval_ms: u64,
}

impl Default for Configs {
    fn default() -> Self {
        Self {
            debug: false,
            tick_interval_ms: default_tick_interval_ms(),
            reconnect_interval_ms: default_reconnect_interval_ms(),
        }
    }
}

impl Configs {
    pub fn load() -> Result<Configs> {
        read_yaml(get_project_dir()?.join("config"), "configs")
    }
}
