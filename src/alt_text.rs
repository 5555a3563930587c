//! Alt text suggestions derived from product names

/// Everything after this marker is internal annotation, not part of the name
const ANNOTATION_MARKER: &str = "***";
const HYPHEN_SEPARATOR: &str = " - ";

/// Suggests an image alt text from a product name.
///
/// - drops everything from the first `***`
/// - then drops everything from the first `(`
/// - a name of exactly two ` - ` separated parts `A - B` becomes `BA`
///
/// Any other shape is returned as truncated. No trimming is applied.
pub fn suggest_alt(name: &str) -> String {
    let alt = truncate_at(name, ANNOTATION_MARKER);
    let alt = truncate_at(alt, "(");

    let parts: Vec<&str> = alt.split(HYPHEN_SEPARATOR).collect();
    match parts.as_slice() {
        [first, second] => format!("{second}{first}"),
        _ => alt.to_string(),
    }
}

fn truncate_at<'a>(text: &'a str, marker: &str) -> &'a str {
    text.split_once(marker).map_or(text, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parenthesised_suffix() {
        assert_eq!(suggest_alt("Foo (Bar)"), "Foo ");
    }

    #[test]
    fn swaps_two_hyphenated_parts() {
        assert_eq!(suggest_alt("A - B"), "BA");
        assert_eq!(
            suggest_alt("Blue Mug - Homeware"),
            "HomewareBlue Mug"
        );
    }

    #[test]
    fn leaves_three_hyphenated_parts_alone() {
        assert_eq!(suggest_alt("X - Y - Z"), "X - Y - Z");
    }

    #[test]
    fn drops_annotation_after_marker() {
        assert_eq!(suggest_alt("Name***ignored"), "Name");
    }

    #[test]
    fn marker_is_applied_before_parenthesis() {
        assert_eq!(suggest_alt("Lamp***(old) - stock"), "Lamp");
        assert_eq!(suggest_alt("Shade - Lamp (large)***sale"), "Lamp Shade");
    }

    #[test]
    fn hyphen_without_spaces_is_not_a_separator() {
        assert_eq!(suggest_alt("T-Shirt"), "T-Shirt");
    }

    #[test]
    fn empty_name_gives_empty_suggestion() {
        assert_eq!(suggest_alt(""), "");
        assert_eq!(suggest_alt("(only brackets)"), "");
    }
}
