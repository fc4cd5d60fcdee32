use cucumber::World;
use std::process::ExitStatus;

#[derive(Default, World)]
pub struct PrWindowWorld {
    pub server: Option<wiremock::MockServer>,
    pub config_dir: Option<tempfile::TempDir>,
    pub captured_output: Vec<u8>,
    pub captured_error: Vec<u8>,
    pub command_status: Option<ExitStatus>,
}

impl std::fmt::Debug for PrWindowWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrWindowWorld")
            .field("server", &self.server.as_ref().map(|s| s.uri()))
            .field("config_dir", &self.config_dir.as_ref().map(|d| d.path()))
            .field("captured_output", &String::from_utf8_lossy(&self.captured_output))
            .field("captured_error", &String::from_utf8_lossy(&self.captured_error))
            .field("command_status", &self.command_status)
            .finish()
    }
}

#[tokio::main]
async fn main() {
    PrWindowWorld::run("tests/features").await;
}

mod steps;
