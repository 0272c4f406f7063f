//! Presentation of simulation results.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{prelude::*, types::SimulationResult};

/// Longest slug kept in a chart file name, in bytes.
pub const MAX_SLUG_BYTES: usize = 80;

/// Format a dollar amount with thousands separators and two decimals.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// File-name-safe form of a risk name, at most `MAX_SLUG_BYTES` long.
pub fn slug(risk: &str) -> String {
    let mut out = String::with_capacity(risk.len());
    let mut last_underscore = false;
    for ch in risk.chars() {
        if out.len() >= MAX_SLUG_BYTES {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_underscore = false;
        } else if !last_underscore {
            out.push('_');
            last_underscore = true;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "risk".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Text card for one result.
pub fn result_card(result: &SimulationResult) -> String {
    format!(
        "{}\n  Min Loss: {}\n  Max Loss: {}\n  Avg Loss: {}",
        result.risk,
        format_amount(result.min_loss),
        format_amount(result.max_loss),
        format_amount(result.avg_loss),
    )
}

/// Chart file name for the result at `index` in a run.
///
/// The index prefix keeps names unique when two risks share a slug.
pub fn graph_file_name(index: usize, risk: &str) -> String {
    format!("{index:02}_{}.png", slug(risk))
}

/// Decode the result's chart and write it to `<out_dir>/<index>_<slug>.png`.
pub fn write_graph(result: &SimulationResult, index: usize, out_dir: &Path) -> Result<PathBuf> {
    let png = result.decode_graph()?;
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(graph_file_name(index, &result.risk));
    std::fs::write(&path, png)?;
    info!(risk = %result.risk, path = %path.display(), "Distribution chart written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_result;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1_000_412.5), "$1,000,412.50");
        assert_eq!(format_amount(999.999), "$1,000.00");
        assert_eq!(format_amount(12.0), "$12.00");
        assert_eq!(format_amount(-120_000.25), "-$120,000.25");
        assert_eq!(format_amount(-0.001), "$0.00");
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Market Risk"), "market_risk");
        assert_eq!(
            slug("Interest-rate / FX exposure (Treat)"),
            "interest_rate_fx_exposure_treat"
        );
        assert_eq!(slug("***"), "risk");
    }

    #[test]
    fn test_slug_is_capped() {
        let sentence = "We may be adversely affected by changes in interest rates, \
                        credit spreads and foreign exchange rates, "
            .repeat(5);
        assert!(sentence.len() > 255);

        let capped = slug(&sentence);
        assert!(capped.len() <= MAX_SLUG_BYTES);
        assert!(capped.starts_with("we_may_be_adversely_affected"));
        assert!(!capped.ends_with('_'));
        assert_eq!(slug(&"Ä".repeat(200)), "risk");
    }

    #[test]
    fn test_write_graph_long_name() {
        let dir = tempfile::tempdir().unwrap();
        let risk = "Our operations depend on third-party vendors and ".repeat(8);
        let path = write_graph(&sample_result(&risk), 0, dir.path()).unwrap();
        assert!(path.exists());
        assert!(path.file_name().unwrap().len() < 100);
    }

    #[test]
    fn test_write_graph_colliding_names() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_graph(&sample_result("Market Risk"), 0, dir.path()).unwrap();
        let second = write_graph(&sample_result("Market-Risk"), 1, dir.path()).unwrap();

        assert_eq!(first, dir.path().join("00_market_risk.png"));
        assert_eq!(second, dir.path().join("01_market_risk.png"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_result_card() {
        let card = result_card(&sample_result("Market"));
        assert_eq!(
            card,
            "Market\n  Min Loss: -$120,000.25\n  Max Loss: $2,180,000.75\n  Avg Loss: $1,000,412.50"
        );
    }

    #[test]
    fn test_write_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_graph(&sample_result("Credit Risk"), 3, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("03_credit_risk.png"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
