use crate::constants::units::{GIB, KIB, MIB};
use crate::telemetry::{ConversionReport, ProgressSnapshot};

/// `B` below 1 KiB, otherwise KB/MB/GB with 2 decimals (binary units).
pub fn format_byte_size(bytes: u64) -> String {
    if bytes >= GIB {
        format!("{:.2} GB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

pub fn format_rate(bytes_per_sec: f64) -> String {
    let (value, unit) = if bytes_per_sec >= GIB as f64 {
        (bytes_per_sec / GIB as f64, "GB/s")
    } else if bytes_per_sec >= MIB as f64 {
        (bytes_per_sec / MIB as f64, "MB/s")
    } else if bytes_per_sec >= KIB as f64 {
        (bytes_per_sec / KIB as f64, "KB/s")
    } else {
        (bytes_per_sec, "B/s")
    };
    format!("{value:.2} {unit}")
}

/// `HH:MM:SS`, zero padded. Hours grow past two digits if needed.
pub fn format_duration(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// ETA form: `1h 2m 3s`.
pub fn format_remaining(secs: u64) -> String {
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// `[====>     ] 50.0%`. A zero total renders as 0%.
pub fn format_progress_bar(current: u64, total: u64, width: usize) -> String {
    let fraction = if total == 0 {
        0.0
    } else {
        (current as f64 / total as f64).min(1.0)
    };
    let pos = (width as f64 * fraction) as usize;

    let mut bar = String::with_capacity(width + 10);
    bar.push('[');
    for i in 0..width {
        bar.push(match i.cmp(&pos) {
            std::cmp::Ordering::Less => '=',
            std::cmp::Ordering::Equal => '>',
            std::cmp::Ordering::Greater => ' ',
        });
    }
    bar.push_str(&format!("] {:.1}%", fraction * 100.0));
    bar
}

pub fn format_bar_line(current: u64, total: u64, width: usize) -> String {
    format!(
        "Calculating Bytes: {} / {}: {}",
        format_byte_size(current),
        format_byte_size(total),
        format_progress_bar(current, total, width)
    )
}

/// Per-second status line, right-padded to `width` columns.
pub fn format_status_line(snapshot: &ProgressSnapshot, width: usize) -> String {
    let mut line = format!(
        "Conversion Progress Status: [Elapsed: {} | Remaining: {} | Speed Rate: {}]",
        format_duration(snapshot.elapsed_secs),
        format_remaining(snapshot.eta_secs),
        format_rate(snapshot.throughput),
    );
    if line.len() < width {
        line.extend(std::iter::repeat(' ').take(width - line.len()));
    }
    line
}

/// Final summary lines: elapsed, average rate, output location.
pub fn format_summary(report: &ConversionReport) -> Vec<String> {
    let mut lines = vec![
        format!("Conversion Elapsed: {}", format_duration(report.elapsed_secs())),
        format!("Data Transfer rate speed: {}", format_rate(report.throughput_bytes_per_sec)),
    ];
    match &report.output_path {
        Some(path) => lines.push(format!("Conversion successful! Output written to {}", path.display())),
        None => lines.push(format!(
            "Conversion successful! {} written",
            format_byte_size(report.bytes_written())
        )),
    }
    lines
}
