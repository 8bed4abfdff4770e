use crate::dev_server::DevServer;

use std::sync::Arc;

/// Where built assets (and the manifest) live: the build directory on disk, or the dev
/// server while it is running.
#[derive(Debug, Clone)]
pub struct BuildDirectoryProvider {
    directory: String,
    dev_server: Arc<DevServer>,
}

impl BuildDirectoryProvider {
    pub fn new(directory: impl Into<String>, dev_server: Arc<DevServer>) -> Self {
        Self {
            directory: directory.into(),
            dev_server,
        }
    }

    /// A provider that always points at `directory`.
    pub fn local(directory: impl Into<String>) -> Self {
        Self::new(directory, Arc::new(DevServer::disabled()))
    }

    pub fn build_directory(&self) -> String {
        if self.dev_server.is_available() {
            self.dev_server.internal_url().to_string()
        } else {
            self.directory.clone()
        }
    }

    pub fn dev_server(&self) -> &Arc<DevServer> {
        &self.dev_server
    }
}
