//! Longest-prefix area resolution
//!
//! Shorter codes are prefixes of longer ones, so prefixes are tried from the
//! longest window length down to the shortest and the first exact hit wins.

use dialplan_core::{AreaCode, AreaCodeIndex, PrefixWindow, UNKNOWN_AREA};

/// Resolves raw phone numbers to area names against one index
#[derive(Debug, Clone, Copy)]
pub struct AreaResolver<'a> {
    index: &'a AreaCodeIndex,
    window: PrefixWindow,
}

impl<'a> AreaResolver<'a> {
    /// Resolver scanning every code length present in `index`
    pub fn new(index: &'a AreaCodeIndex) -> Self {
        Self {
            index,
            window: index.prefix_window(),
        }
    }

    /// Resolver with an explicit scan window
    pub fn with_window(index: &'a AreaCodeIndex, window: PrefixWindow) -> Self {
        Self { index, window }
    }

    pub fn window(&self) -> PrefixWindow {
        self.window
    }

    /// Most specific area code that prefixes `raw`, if any
    pub fn resolve_code(&self, raw: &str) -> Option<&'a AreaCode> {
        let digits = normalize(raw);
        let index = self.index;

        self.window
            .lengths()
            .filter(|&len| len <= digits.len())
            .find_map(|len| index.get(&digits[..len]))
    }

    /// Area name for `raw`, or [`UNKNOWN_AREA`]
    pub fn resolve(&self, raw: &str) -> &'a str {
        self.resolve_code(raw)
            .map(AreaCode::area_name)
            .unwrap_or(UNKNOWN_AREA)
    }
}

/// Strip everything but ASCII digits
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Resolve `raw` against `index` with the window derived from the index
pub fn resolve<'a>(index: &'a AreaCodeIndex, raw: &str) -> &'a str {
    AreaResolver::new(index).resolve(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> AreaCodeIndex {
        AreaCodeIndex::build([("20", "London"), ("207", "Soho")]).unwrap()
    }

    #[test]
    fn longest_prefix_wins() {
        let index = london();
        assert_eq!(resolve(&index, "20712"), "Soho");
        assert_eq!(resolve(&index, "20199"), "London");
    }

    #[test]
    fn formatting_is_ignored() {
        let index = london();
        assert_eq!(resolve(&index, "(20) 8946-0018"), "London");
        assert_eq!(resolve(&index, "207-946 0018"), "Soho");
        assert_eq!(normalize("+44 (0)20-7946"), "440207946");
    }

    #[test]
    fn unmatched_numbers_are_unknown() {
        let index = london();
        assert_eq!(resolve(&index, "000000"), UNKNOWN_AREA);
        assert_eq!(resolve(&index, ""), UNKNOWN_AREA);
        assert_eq!(resolve(&index, "not a number"), UNKNOWN_AREA);
    }

    #[test]
    fn short_numbers_match_shorter_codes() {
        let index = london();
        assert_eq!(resolve(&index, "20"), "London");
        assert_eq!(resolve(&index, "2"), UNKNOWN_AREA);
    }

    #[test]
    fn window_is_derived_from_the_index() {
        let index = AreaCodeIndex::build([("1", "One"), ("1234567", "Seven")]).unwrap();
        let resolver = AreaResolver::new(&index);

        assert_eq!((resolver.window().min(), resolver.window().max()), (1, 7));
        assert_eq!(resolver.resolve("12345678"), "Seven");
        assert_eq!(resolver.resolve("19"), "One");
    }

    #[test]
    fn fixed_window_misses_codes_outside_it() {
        let index = AreaCodeIndex::build([("1", "One"), ("1234567", "Seven")]).unwrap();
        let resolver = AreaResolver::with_window(&index, PrefixWindow::DEFAULT);

        assert_eq!(resolver.resolve("12345678"), UNKNOWN_AREA);
    }

    #[test]
    fn resolution_is_deterministic() {
        let index = london();
        let resolver = AreaResolver::new(&index);
        let first = resolver.resolve("2071234567");
        for _ in 0..10 {
            assert_eq!(resolver.resolve("2071234567"), first);
        }
    }
}
