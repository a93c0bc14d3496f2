use std::path::Path;

const DOTENV_CANDIDATES: [&str; 3] = [".env", "../.env", "../../.env"];

/// Loads `.env` and then installs logging, so a `RUST_LOG` set in `.env`
/// reaches the log filter.
pub fn init_environment() {
    let loaded = load_dotenv();
    crate::logger::init_logging();
    for path in loaded {
        tracing::debug!("loaded environment from {}", path);
    }
}

/// Loads variables from `.env` files (best-effort), never overriding the shell.
///
/// Tries the current directory and its two parents so the binary works when
/// launched from inside a crate directory. Returns the files that were read.
pub fn load_dotenv() -> Vec<&'static str> {
    DOTENV_CANDIDATES
        .into_iter()
        .filter(|path| load_env_file(Path::new(path)))
        .collect()
}

pub fn load_env_file(path: &Path) -> bool {
    dotenv::from_path(path).is_ok()
}
