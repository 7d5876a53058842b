//! ASCII startup banner with a warm gradient (VENDOR ONBOARD).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Saffron (#ff9933).
const SAFFRON: (u8, u8, u8) = (0xff, 0x99, 0x33);
/// Chili Red (#d7263d).
const CHILI_RED: (u8, u8, u8) = (0xd7, 0x26, 0x3d);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "VENDOR" in standard figlet with a saffron to
/// chili-red gradient, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let Ok(font) = FIGfont::standard() else {
        let _ = writeln!(out, "VENDOR ONBOARD v{}", env!("CARGO_PKG_VERSION"));
        return;
    };
    let Some(figure) = font.convert("VENDOR") else {
        let _ = writeln!(out, "VENDOR ONBOARD v{}", env!("CARGO_PKG_VERSION"));
        return;
    };
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(SAFFRON, CHILI_RED, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: CHILI_RED.0,
        g: CHILI_RED.1,
        b: CHILI_RED.2,
    }));
    let _ = out.execute(Print(format!(
        "Restaurant vendor onboarding v{}\r\n\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
