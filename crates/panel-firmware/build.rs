//! Build script: linker script selection and build-time panel settings.
//!
//! `PANEL_*` values are read from the environment or a `.env` file next to
//! the manifest and forwarded to the crate as `option_env!` values.

const PANEL_KEYS: [&str; 3] = [
    "PANEL_TICK_MS",
    "PANEL_TOUCH_POLL_MS",
    "PANEL_INPUT_LOCK_TIMEOUT_MS",
];

fn main() {
    if let Ok(path) = dotenvy::dotenv() {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    for key in PANEL_KEYS {
        println!("cargo:rerun-if-env-changed={key}");
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={key}={value}");
        }
    }

    println!("cargo:rustc-link-arg=-Tlinkall.x");
}
