//! Stepped fill-color expression and legend rows for classified scores.
//!
//! The expression uses the map style `step` form:
//! `["step", ["get", property], base_color, threshold_1, color_1, ...]`.
//! A score below the first interior boundary takes the base color; each
//! interior boundary starts the next palette color.

use serde_json::{Value, json};
use tlbi_map_index_models::{Breakpoints, LegendEntry};

/// Interior thresholds the step form can use, each strictly above the
/// previous kept one.
fn step_thresholds(breaks: &Breakpoints) -> Vec<f64> {
    let mut thresholds: Vec<f64> = Vec::with_capacity(breaks.interior().len());
    for &threshold in breaks.interior() {
        if thresholds.last().is_none_or(|&previous| threshold > previous) {
            thresholds.push(threshold);
        }
    }
    thresholds
}

/// Builds the fill-color expression for `property`.
///
/// Returns `fallback` as a plain color string when `breaks` cannot
/// classify (fewer than two boundaries) or `palette` is empty.
/// Thresholds that do not strictly increase are skipped, since the
/// renderer rejects them, and each kept threshold starts the next
/// palette color.
#[must_use]
pub fn step_expression(
    property: &str,
    breaks: &Breakpoints,
    palette: &[String],
    fallback: &str,
) -> Value {
    if palette.is_empty() || !breaks.is_classified() {
        return Value::String(fallback.to_string());
    }

    let thresholds = step_thresholds(breaks);
    let skipped = breaks.interior().len() - thresholds.len();
    if skipped > 0 {
        log::warn!("Skipping {skipped} non-increasing thresholds for {property}");
    }
    if palette.len() <= thresholds.len() {
        log::warn!(
            "Palette has {} colors, not enough for {} classes",
            palette.len(),
            thresholds.len() + 1
        );
    }

    let mut expression = vec![json!("step"), json!(["get", property]), json!(palette[0])];
    for (threshold, color) in thresholds.into_iter().zip(&palette[1..]) {
        expression.push(json!(threshold));
        expression.push(json!(color));
    }

    Value::Array(expression)
}

/// One legend row per class of the step expression, lowest first.
///
/// Rows follow the same thresholds as [`step_expression`], so a skipped
/// threshold merges its neighbouring classes here too. Empty when
/// `breaks` cannot classify or `palette` is empty.
#[must_use]
pub fn legend(breaks: &Breakpoints, palette: &[String]) -> Vec<LegendEntry> {
    let (Some(min), Some(max)) = (breaks.min(), breaks.max()) else {
        return Vec::new();
    };
    if !breaks.is_classified() || palette.is_empty() {
        return Vec::new();
    }

    let mut thresholds = step_thresholds(breaks);
    thresholds.truncate(palette.len() - 1);

    let mut bounds = vec![min];
    bounds.extend(thresholds);
    bounds.push(max);

    bounds
        .windows(2)
        .zip(palette)
        .map(|(pair, color)| LegendEntry {
            from: pair[0],
            to: pair[1],
            color: color.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<String> {
        ["#2166ac", "#67a9cf", "#d1e5f0", "#fddbc7", "#ef8a62", "#b2182b"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn builds_step_from_interior_breaks() {
        let breaks = Breakpoints(vec![0.1, 0.15, 0.2, 0.5, 0.55, 0.9, 0.95]);
        let expression = step_expression("TLBI", &breaks, &palette(), "#ccc");
        assert_eq!(
            expression,
            json!([
                "step", ["get", "TLBI"], "#2166ac",
                0.15, "#67a9cf",
                0.2, "#d1e5f0",
                0.5, "#fddbc7",
                0.55, "#ef8a62",
                0.9, "#b2182b"
            ])
        );
    }

    #[test]
    fn fewer_classes_use_fewer_colors() {
        let breaks = Breakpoints(vec![0.0, 0.4, 1.0]);
        let expression = step_expression("TLBI", &breaks, &palette(), "#ccc");
        assert_eq!(
            expression,
            json!(["step", ["get", "TLBI"], "#2166ac", 0.4, "#67a9cf"])
        );
    }

    #[test]
    fn unclassified_breaks_fall_back_to_flat_color() {
        for breaks in [Breakpoints::default(), Breakpoints(vec![0.5])] {
            assert_eq!(
                step_expression("TLBI", &breaks, &palette(), "#ccc"),
                json!("#ccc")
            );
        }
        assert_eq!(
            step_expression("TLBI", &Breakpoints(vec![0.0, 1.0]), &[], "#ccc"),
            json!("#ccc")
        );
    }

    #[test]
    fn repeated_thresholds_are_skipped() {
        let breaks = Breakpoints(vec![0.0, 0.3, 0.3, 0.6, 1.0]);
        let expression = step_expression("TLBI", &breaks, &palette(), "#ccc");
        assert_eq!(
            expression,
            json!(["step", ["get", "TLBI"], "#2166ac", 0.3, "#67a9cf", 0.6, "#d1e5f0"])
        );
    }

    #[test]
    fn legend_matches_expression_when_thresholds_repeat() {
        let breaks = Breakpoints(vec![0.0, 0.3, 0.3, 0.6, 1.0]);
        let expression = step_expression("TLBI", &breaks, &palette(), "#ccc");
        let rows = legend(&breaks, &palette());

        let bounds: Vec<(f64, f64)> = rows.iter().map(|row| (row.from, row.to)).collect();
        assert_eq!(bounds, vec![(0.0, 0.3), (0.3, 0.6), (0.6, 1.0)]);

        let expression = expression.as_array().unwrap();
        assert_eq!(expression[2], json!(rows[0].color));
        assert_eq!(expression[4], json!(rows[1].color));
        assert_eq!(expression[6], json!(rows[2].color));
    }

    #[test]
    fn short_palette_merges_upper_classes_consistently() {
        let breaks = Breakpoints(vec![0.0, 0.2, 0.5, 0.8, 1.0]);
        let short = palette()[..2].to_vec();

        assert_eq!(
            step_expression("TLBI", &breaks, &short, "#ccc"),
            json!(["step", ["get", "TLBI"], "#2166ac", 0.2, "#67a9cf"])
        );
        let rows = legend(&breaks, &short);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[1].from, rows[1].to), (0.2, 1.0));
        assert_eq!(rows[1].color, "#67a9cf");
    }

    #[test]
    fn legend_has_one_row_per_class() {
        let breaks = Breakpoints(vec![0.0, 0.4, 1.0]);
        let rows = legend(&breaks, &palette());
        assert_eq!(
            rows,
            vec![
                LegendEntry {
                    from: 0.0,
                    to: 0.4,
                    color: "#2166ac".to_string(),
                },
                LegendEntry {
                    from: 0.4,
                    to: 1.0,
                    color: "#67a9cf".to_string(),
                },
            ]
        );
    }

    #[test]
    fn legend_is_empty_when_unclassified() {
        assert!(legend(&Breakpoints(vec![0.5]), &palette()).is_empty());
    }
}
