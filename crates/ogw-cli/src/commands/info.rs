//! Info command: what this build can read and write

use anyhow::Result;

pub fn run() -> Result<()> {
    println!("OGW v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Image inputs:");
    println!("  png               - Portable Network Graphics");
    println!("  jpeg, jpg         - JPEG");
    println!("  gif               - GIF (first frame)");
    println!("  webp              - WebP");
    println!();
    println!("Output Formats:");
    println!("  png               - RGBA PNG (compression: fast, default, best)");
    println!("  jpeg              - JPEG, alpha dropped (quality 1-100)");
    println!("  raw               - RGBA8 bytes, row-major, no header");
    println!();
    println!("Environment:");
    println!("  OGW_FAILURE_POLICY  degrade | abort");
    println!("  OGW_WINDOW          fallback canvas size, e.g. 1200x630");
    Ok(())
}
