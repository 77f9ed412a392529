//! Dashboard configuration.
//!
//! Nothing is read from the environment or the command line. The dashboard
//! always serves on the loopback address at the default port and looks for
//! the results workbook in the working directory.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const PORT: u16 = 8050;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot resolve current directory: {0}")]
    CurrentDir(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Directory searched for the results workbook.
    pub data_dir: PathBuf,
    pub bind: SocketAddr,
}

impl DashboardConfig {
    /// Config rooted at the process's working directory.
    pub fn from_current_dir() -> Result<Self, ConfigError> {
        Ok(Self::for_dir(&std::env::current_dir()?))
    }

    pub fn for_dir(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            bind: SocketAddr::new(HOST, PORT),
        }
    }

    /// Browser URL for the bound address.
    pub fn url(&self) -> String {
        format!("http://{}/", self.bind)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
