/// Fixed-point tick label with trailing zeros and a bare trailing '.' removed.
pub fn format_tick(v: f64) -> String {
    let mut s = format!("{:.6}", v);
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s
    }
}

/// Step-axis label: whole non-negative steps only, blank between them.
pub fn step_tick(v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() < 1e-9 && rounded >= 0.0 {
        format!("{}", rounded as i64)
    } else {
        String::new()
    }
}

/// `"{name} (×10^{exponent} {unit})"`, without a dangling space for unitless metrics.
pub fn y_axis_label(name: &str, exponent: i32, unit: &str) -> String {
    if unit.is_empty() {
        format!("{name} (×10^{exponent})")
    } else {
        format!("{name} (×10^{exponent} {unit})")
    }
}

pub fn chart_title(name: &str) -> String {
    format!("Comparison of {name} over Steps")
}

pub fn chart_file_name(name: &str) -> String {
    format!("{name}_comparison.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_zeros() {
        assert_eq!(format_tick(0.500), "0.5");
        assert_eq!(format_tick(1.000), "1");
        assert_eq!(format_tick(0.125), "0.125");
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(0.6000000000000001), "0.6");
    }

    #[test]
    fn negative_zero_collapses() {
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(-1e-9), "0");
        assert_eq!(format_tick(-0.25), "-0.25");
    }

    #[test]
    fn step_ticks_are_whole_numbers() {
        assert_eq!(step_tick(0.0), "0");
        assert_eq!(step_tick(4.0), "4");
        assert_eq!(step_tick(2.0000000001), "2");
        assert_eq!(step_tick(2.5), "");
        assert_eq!(step_tick(-0.2), "");
    }

    #[test]
    fn labels() {
        assert_eq!(
            y_axis_label("Energy", 2, "kW"),
            "Energy (×10^2 kW)".to_string()
        );
        assert_eq!(y_axis_label("JFI", -1, ""), "JFI (×10^-1)");
        assert_eq!(chart_title("Min Fluent"), "Comparison of Min Fluent over Steps");
        assert_eq!(chart_file_name("Min Fluent"), "Min Fluent_comparison.png");
    }
}
