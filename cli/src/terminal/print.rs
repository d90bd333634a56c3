use colored::*;
use unicode_width::UnicodeWidthStr;
use whoshere_common::net::device::{Device, ScanResult};

pub const TOTAL_WIDTH: usize = 64;

const WIDE_COL: usize = 20;
const NARROW_COL: usize = 12;

const BANNER: &str = r#"
     _      __ __           _  __
    | | /| / // /  ___  ___( )/ /  ___  ____ ___
    | |/ |/ // _ \/ _ \(_-</// _ \/ -_)/ __// -_)
    |__/|__//_//_/\___//___/ /_//_/\__//_/   \__/
"#;

pub fn banner() {
    let text_content: String = format!("⟦ WHOSHERE v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat((TOTAL_WIDTH - text_width) / 2).bright_black();

    println!("{}{}{}", sep, text, sep);
    println!("{}", BANNER.bright_cyan());
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{}", line);
}

/// Network name, mask, prefix and interface of the completed cycle.
pub fn summary_table(result: &ScanResult) {
    println!();
    header("network");
    println!(
        "  {}{}{}{}",
        pad("SSID", WIDE_COL).yellow().bold(),
        pad("Subnet Mask", WIDE_COL).yellow().bold(),
        pad("CIDR", NARROW_COL).yellow().bold(),
        "Interface".yellow().bold(),
    );
    row_separator();
    println!(
        "  {}{}{}{}",
        pad(&result.network_name, WIDE_COL),
        pad(&result.subnet.mask, WIDE_COL),
        pad(&result.subnet.prefix.to_string(), NARROW_COL),
        result.interface,
    );
    println!();
}

/// One row per discovered device, in reply-arrival order.
pub fn device_table(devices: &[Device]) {
    header("devices");
    if devices.is_empty() {
        no_devices();
        return;
    }

    println!(
        "  {}{}{}",
        pad("IP Address", WIDE_COL).yellow().bold(),
        pad("Mac Address", WIDE_COL).yellow().bold(),
        "Hostname".yellow().bold(),
    );
    row_separator();
    for device in devices {
        println!(
            "  {}{}{}",
            pad(&device.addr.to_string(), WIDE_COL),
            pad(&device.mac.to_string(), WIDE_COL),
            device.hostname,
        );
    }

    let unit = if devices.len() == 1 { "device" } else { "devices" };
    centerln(&format!("{} {unit} discovered", devices.len()).bright_green().bold());
}

pub fn no_devices() {
    println!("  {}", "no devices answered the scan".red().bold());
}

pub fn end_of_run() {
    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

fn row_separator() {
    println!(" +{}+", "-".repeat(TOTAL_WIDTH - 2).bright_black());
}

fn centerln(msg: &ColoredString) {
    let width = console::measure_text_width(&msg.to_string());
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    println!("{}{}", space, msg);
}

/// Pads before coloring so escape codes never skew the column widths.
fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}
