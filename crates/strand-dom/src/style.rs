//! Inline styles and geometry helpers

use crate::node::ElementData;

/// One inline style property
#[derive(Debug, Clone)]
pub struct StyleProperty {
    pub name: String,
    pub value: String,
}

/// Full height of an element: its height plus vertical margins.
///
/// Computed from inline style pixel values; absent or non-numeric
/// properties count as zero.
pub fn full_height(element: &ElementData) -> f64 {
    px(element.style("height"))
        + px(element.style("margin-top"))
        + px(element.style("margin-bottom"))
}

fn px(value: Option<&str>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_height_sums_margins() {
        let mut element = ElementData::new("div");
        element.set_style("height", "120px");
        element.set_style("margin-top", "8px");
        element.set_style("margin-bottom", "12");

        assert_eq!(full_height(&element), 140.0);
    }

    #[test]
    fn test_missing_properties_count_as_zero() {
        let mut element = ElementData::new("div");
        element.set_style("height", "50px");

        assert_eq!(full_height(&element), 50.0);
        assert_eq!(full_height(&ElementData::new("span")), 0.0);
    }

    #[test]
    fn test_non_numeric_value_counts_as_zero() {
        let mut element = ElementData::new("div");
        element.set_style("height", "auto");

        assert_eq!(full_height(&element), 0.0);
    }
}
