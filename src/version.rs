use std::fmt;

use crate::boundary::BoundaryWarning;

/// The patch segment of a version, optionally carrying a hyphenated suffix.
///
/// Only the numeric part is ever incremented; the suffix (e.g. `rc1` in
/// `3-rc1`) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSegment {
    pub numeric: String,
    pub suffix: Option<String>,
}

impl PatchSegment {
    /// Splits a patch segment on its first `-`.
    ///
    /// A leading hyphen also splits: `"-rc1"` has an empty numeric part and
    /// bumps to `"1-rc1"`. PHP release scripts testing `strpos` for
    /// truthiness skip the split there and produce `"1"` instead.
    pub fn parse(segment: &str) -> Self {
        match segment.split_once('-') {
            Some((numeric, suffix)) => PatchSegment {
                numeric: numeric.to_string(),
                suffix: Some(suffix.to_string()),
            },
            None => PatchSegment {
                numeric: segment.to_string(),
                suffix: None,
            },
        }
    }

    /// Decimal value of the numeric part, without leading zeros.
    ///
    /// Leading ASCII digits are read (`"3rc"` is `"3"`); no digits at all
    /// reads as `"0"`. There is no upper bound.
    pub fn value(&self) -> &str {
        match leading_digits(&self.numeric).map(|d| d.trim_start_matches('0')) {
            Some(digits) if !digits.is_empty() => digits,
            _ => "0",
        }
    }

    /// True when the numeric part starts with at least one digit.
    pub fn is_numeric(&self) -> bool {
        leading_digits(&self.numeric).is_some()
    }

    /// Returns the segment with its numeric part incremented by one.
    pub fn bumped(&self) -> Self {
        PatchSegment {
            numeric: increment_decimal(self.value()),
            suffix: self.suffix.clone(),
        }
    }
}

impl fmt::Display for PatchSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suffix {
            Some(suffix) => write!(f, "{}-{}", self.numeric, suffix),
            None => write!(f, "{}", self.numeric),
        }
    }
}

fn leading_digits(text: &str) -> Option<&str> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let digits = &text[..end];

    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Adds one to a string of ASCII digits, carrying from the right.
fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();

    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }

    // every digit carried over
    let mut carried = String::with_capacity(bytes.len() + 1);
    carried.push('1');
    carried.push_str(&String::from_utf8_lossy(&bytes));
    carried
}

/// A version normalized to exactly three segments.
///
/// Major and minor are kept verbatim; they are never coerced to numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: String,
    pub minor: String,
    pub patch: PatchSegment,
}

impl Version {
    /// Normalizes a dotted version string without incrementing it.
    ///
    /// Missing minor and patch segments default to `0`; segments past the
    /// third are dropped.
    pub fn parse(version: &str) -> Self {
        let mut segments = version.split('.');

        let major = segments.next().unwrap_or_default().to_string();
        let minor = segments.next().unwrap_or("0").to_string();
        let patch = PatchSegment::parse(segments.next().unwrap_or("0"));

        Version {
            major,
            minor,
            patch,
        }
    }

    /// Returns the version with the patch number incremented.
    pub fn bump_patch(&self) -> Self {
        Version {
            major: self.major.clone(),
            minor: self.minor.clone(),
            patch: self.patch.bumped(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The result of computing the next version from the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionIncrement {
    pub previous: String,
    pub next: String,
    pub notices: Vec<BoundaryWarning>,
}

/// Computes the next version along with any notices worth showing the
/// operator before confirmation.
///
/// Inputs with fewer than three segments are padded with `0` and are NOT
/// incremented (`"1.2"` becomes `"1.2.0"`). Inputs with three or more
/// segments get their patch number incremented and are truncated to three
/// segments (`"1.2.3.4"` becomes `"1.2.4"`).
pub fn plan_increment(current: &str) -> VersionIncrement {
    let segments: Vec<&str> = current.split('.').collect();
    let version = Version::parse(current);

    let mut notices = Vec::new();

    let next = if segments.len() < 3 {
        let padded = version.to_string();
        notices.push(BoundaryWarning::PaddedWithoutIncrement {
            from: current.to_string(),
            to: padded.clone(),
        });
        padded
    } else {
        if !version.patch.is_numeric() {
            notices.push(BoundaryWarning::NonNumericPatch {
                segment: segments[2].to_string(),
            });
        }
        version.bump_patch().to_string()
    };

    if segments.len() > 3 {
        notices.push(BoundaryWarning::SegmentsDiscarded {
            version: current.to_string(),
            discarded: segments[3..].iter().map(|s| s.to_string()).collect(),
        });
    }

    VersionIncrement {
        previous: current.to_string(),
        next,
        notices,
    }
}

/// Computes the next version string.
///
/// # Example
/// ```
/// use revbump::version::increment_version;
///
/// assert_eq!(increment_version("1.4.9"), "1.4.10");
/// assert_eq!(increment_version("1.2.3-rc1"), "1.2.4-rc1");
/// assert_eq!(increment_version("2.0"), "2.0.0");
/// ```
pub fn increment_version(current: &str) -> String {
    plan_increment(current).next
}
