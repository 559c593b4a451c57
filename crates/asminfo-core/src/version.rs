//! Four-component version values with wildcard round-tripping.
//!
//! Assembly versions are `major.minor.build.revision`, where the trailing
//! one or two components may be the auto-assign marker `*`. Arithmetic
//! happens on the fully numeric form; the wildcard shape is remembered and
//! reinstated when the value is written back.

use std::fmt;

use serde::{Serialize, Serializer};

/// Wildcard shape of the version text a value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wildcard {
    /// Fully numeric, e.g. `1.2.3.4`.
    #[default]
    None,
    /// Three parts with a trailing star, e.g. `1.2.*`.
    ThreePart,
    /// Four parts with a trailing star, e.g. `1.2.3.*`.
    FourPart,
}

/// A fully numeric four-component version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parse exactly four dot-separated integer components.
    pub fn parse(text: &str) -> Option<Self> {
        let mut components = text.split('.');
        let version = Self {
            major: components.next()?.trim().parse().ok()?,
            minor: components.next()?.trim().parse().ok()?,
            build: components.next()?.trim().parse().ok()?,
            revision: components.next()?.trim().parse().ok()?,
        };
        if components.next().is_some() {
            return None;
        }
        Some(version)
    }

    /// Component values in slot order.
    pub fn components(&self) -> [u32; 4] {
        [self.major, self.minor, self.build, self.revision]
    }

    /// Render in the given wildcard shape.
    ///
    /// Components covered by the star are omitted from the text; the
    /// numeric value is unaffected.
    pub fn render(&self, wildcard: Wildcard) -> String {
        match wildcard {
            Wildcard::None => self.to_string(),
            Wildcard::ThreePart => format!("{}.{}.*", self.major, self.minor),
            Wildcard::FourPart => format!("{}.{}.{}.*", self.major, self.minor, self.build),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Replace a trailing wildcard with zero components for arithmetic,
/// remembering the shape to reproduce on write.
///
/// `1.2.*` computes as `1.2.0.0`; `1.2.3.*` computes as `1.2.3.0`.
pub fn normalize_wildcard(text: &str) -> (String, Wildcard) {
    if !text.contains('*') {
        return (text.to_string(), Wildcard::None);
    }

    if text.split('.').count() == 3 {
        (text.replacen('*', "0.0", 1), Wildcard::ThreePart)
    } else {
        (text.replacen('*', "0", 1), Wildcard::FourPart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_four_components() {
        assert_eq!(Version::parse("1.2.3.4"), Some(Version::new(1, 2, 3, 4)));
        assert_eq!(Version::parse("0.0.0.0"), Some(Version::default()));
    }

    #[rstest]
    #[case("1.2.3")]
    #[case("1.2.3.4.5")]
    #[case("1.2.3.x")]
    #[case("1.2.*")]
    #[case("")]
    fn test_parse_rejects_non_four_part(#[case] text: &str) {
        assert_eq!(Version::parse(text), None);
    }

    #[test]
    fn test_display_joins_with_dots() {
        assert_eq!(Version::new(1, 2, 3, 4).to_string(), "1.2.3.4");
    }

    #[test]
    fn test_ordering_is_component_wise() {
        assert!(Version::new(1, 2, 3, 4) < Version::new(1, 2, 4, 0));
        assert!(Version::new(2, 0, 0, 0) > Version::new(1, 99, 99, 99));
    }

    #[test]
    fn test_normalize_plain_version() {
        assert_eq!(
            normalize_wildcard("1.2.3.4"),
            ("1.2.3.4".to_string(), Wildcard::None)
        );
    }

    #[test]
    fn test_normalize_three_part_wildcard() {
        assert_eq!(
            normalize_wildcard("1.2.*"),
            ("1.2.0.0".to_string(), Wildcard::ThreePart)
        );
    }

    #[test]
    fn test_normalize_four_part_wildcard() {
        assert_eq!(
            normalize_wildcard("1.2.3.*"),
            ("1.2.3.0".to_string(), Wildcard::FourPart)
        );
    }

    #[test]
    fn test_render_reinstates_wildcard_shape() {
        let version = Version::new(1, 2, 3, 4);
        assert_eq!(version.render(Wildcard::None), "1.2.3.4");
        assert_eq!(version.render(Wildcard::ThreePart), "1.2.*");
        assert_eq!(version.render(Wildcard::FourPart), "1.2.3.*");
    }
}
