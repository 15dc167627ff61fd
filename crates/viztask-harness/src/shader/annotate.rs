/// Prefixes every line of `source` with its 1-based line number, right-aligned
/// to a fixed 4-column width, so compiler diagnostics that reference line
/// numbers can be read directly against the output.
pub fn annotate_source(source: &str) -> String {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| format!("{:>4} | {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotates_every_line_with_one_based_numbers() {
        let src = "let a = 1;\nlet b = 2;\nlet c = 3;\n";
        let annotated = annotate_source(src);
        let lines: Vec<&str> = annotated.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   1 | let a = 1;");
        assert_eq!(lines[1], "   2 | let b = 2;");
        assert_eq!(lines[2], "   3 | let c = 3;");
    }

    #[test]
    fn line_count_matches_source() {
        let src = (1..=12).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        assert_eq!(annotate_source(&src).lines().count(), 12);
    }

    #[test]
    fn numbers_stay_aligned_past_three_digits() {
        let src = vec!["x"; 1000].join("\n");
        let annotated = annotate_source(&src);
        assert!(annotated.lines().nth(8).unwrap().starts_with("   9 | "));
        assert!(annotated.lines().nth(999).unwrap().starts_with("1000 | "));
    }

    #[test]
    fn empty_source_annotates_to_nothing() {
        assert_eq!(annotate_source(""), "");
    }
}
