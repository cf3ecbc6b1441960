//! Build script for avrkit-hal-atmega328p
//!
//! - Validates board.toml at compile time
//! - Generates the board constants into OUT_DIR/board_config.rs

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding the board config path
const CONFIG_ENV: &str = "AVRKIT_BOARD_CONFIG";

/// Timer0 prescalers the hardware supports
const PRESCALERS: [(u32, &str); 5] = [
    (1, "Div1"),
    (8, "Div8"),
    (64, "Div64"),
    (256, "Div256"),
    (1024, "Div1024"),
];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardConfig {
    board: Board,
    timekeeping: Timekeeping,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Board {
    name: String,
    cpu_hz: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Timekeeping {
    prescaler: u32,
    #[serde(default = "default_enable_interrupts")]
    enable_interrupts: bool,
}

fn default_enable_interrupts() -> bool {
    true
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={}", CONFIG_ENV);

    let config_path = env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("board.toml"));
    println!("cargo:rerun-if-changed={}", config_path.display());

    let config = load_config(&config_path);
    validate_config(&config);
    write_constants(&config);
}

/// Read and parse the board config, aborting the build on failure
fn load_config(path: &Path) -> BoardConfig {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(&format!("Failed to read {}", path.display()), &e.to_string()),
    };

    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail(&format!("Invalid board config {}", path.display()), &e.to_string()),
    }
}

/// Check the values the hardware and the clock math can accept
fn validate_config(config: &BoardConfig) {
    let mut errors = Vec::new();

    if config.board.name.trim().is_empty() {
        errors.push("board.name must not be empty".to_string());
    }
    if config.board.cpu_hz == 0 {
        errors.push("board.cpu_hz must not be 0".to_string());
    } else if config.board.cpu_hz % 1_000_000 != 0 {
        errors.push(format!(
            "board.cpu_hz = {} is not a whole number of MHz",
            config.board.cpu_hz
        ));
    }
    if prescaler_variant(config.timekeeping.prescaler).is_none() {
        errors.push(format!(
            "timekeeping.prescaler = {} (expected 1, 8, 64, 256 or 1024)",
            config.timekeeping.prescaler
        ));
    }

    if !errors.is_empty() {
        fail("Invalid values in board config", &errors.join("\n"));
    }
}

fn prescaler_variant(divisor: u32) -> Option<&'static str> {
    PRESCALERS
        .iter()
        .find(|(value, _)| *value == divisor)
        .map(|(_, name)| *name)
}

/// Emit board_config.rs
fn write_constants(config: &BoardConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let variant = prescaler_variant(config.timekeeping.prescaler)
        .expect("prescaler validated above");

    let source = format!(
        "/// Board name from board.toml\n\
         pub const BOARD_NAME: &str = {name:?};\n\
         /// CPU clock in Hz\n\
         pub const CPU_HZ: u32 = {cpu_hz};\n\
         /// Timer0 prescaler used by the system clock\n\
         pub const TIMER0_PRESCALER: avrkit_hal::Prescaler = avrkit_hal::Prescaler::{variant};\n\
         /// Whether init() sets the global interrupt flag\n\
         pub const ENABLE_INTERRUPTS_ON_INIT: bool = {enable};\n",
        name = config.board.name,
        cpu_hz = config.board.cpu_hz,
        variant = variant,
        enable = config.timekeeping.enable_interrupts,
    );

    if let Err(e) = fs::write(out_dir.join("board_config.rs"), source) {
        fail("Failed to write board_config.rs", &e.to_string());
    }
}

/// Abort the build with a framed error message
fn fail(title: &str, detail: &str) -> ! {
    let rule = "═".repeat(68);
    let body = detail
        .lines()
        .map(|line| format!("║  {}", line))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n╔{rule}╗\n║  ERROR: {title}\n╠{rule}╣\n{body}\n╚{rule}╝\n",
        rule = rule,
        title = title,
        body = body
    );
}
