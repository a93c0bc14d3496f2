use std::process::{Command, Stdio};

use async_trait::async_trait;
use router::{OpenerPort, ProviderResult};
use tracing::{info, warn};
use url::Url;

use crate::error::ProviderFault;

/// Opens web addresses in the platform's default viewer.
///
/// The viewer process is spawned and left running; nothing waits on it.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    dry_run: bool,
}

impl SystemOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and logs addresses but never launches anything.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    fn launch(&self, address: &str) -> Result<(), ProviderFault> {
        let url = validate_address(address)?;

        if self.dry_run {
            info!("dry run, not opening {}", url);
            return Ok(());
        }

        viewer_command(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ProviderFault::Launch)?;

        info!("opened {}", url);
        Ok(())
    }
}

#[async_trait]
impl OpenerPort for SystemOpener {
    async fn open(&self, address: &str) -> ProviderResult {
        match self.launch(address) {
            Ok(()) => ProviderResult::Success(format!("Opening {}", address)),
            Err(e) => {
                warn!("cannot open {}: {}", address, e);
                ProviderResult::error(e.to_string())
            }
        }
    }
}

/// Only http(s) addresses with a host are handed to the viewer.
pub fn validate_address(address: &str) -> Result<Url, ProviderFault> {
    let unsupported = || ProviderFault::UnsupportedAddress(address.to_string());
    let url = Url::parse(address).map_err(|_| unsupported())?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(unsupported()),
    }
}

fn viewer_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        program_with_url("open", &[], url)
    } else if cfg!(target_os = "windows") {
        windows_viewer(url)
    } else {
        program_with_url("xdg-open", &[], url)
    }
}

// `cmd /C start` would re-parse `&`, `|` and `^` inside the address.
// The URL protocol handler takes the address as one argument.
fn windows_viewer(url: &str) -> Command {
    program_with_url("rundll32", &["url.dll,FileProtocolHandler"], url)
}

fn program_with_url(program: &str, leading: &[&str], url: &str) -> Command {
    let mut command = Command::new(program);
    command.args(leading).arg(url);
    command
}
