use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 23119;
pub const DEFAULT_ADDRESS: &str = "localhost";
/// Bibliography file, relative to the home directory.
pub const DEFAULT_OUTPUT: &str = ".bib/EB.bib";

/// Where the connector listener binds and where saved items go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub output: PathBuf,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            output: default_output(),
        }
    }
}

/// Word lists backing the spelling dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionarySources {
    /// Base dictionaries; empty means "use a system dictionary".
    pub words: Vec<PathBuf>,
    /// Personal word lists added on top.
    pub personal: Vec<PathBuf>,
}

pub fn default_output() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(DEFAULT_OUTPUT),
        None => PathBuf::from(DEFAULT_OUTPUT),
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
