use std::fmt;

/// Notices raised while computing the next version.
/// These are non-fatal and are reported to the operator before confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Fewer than three segments: the version was padded but not incremented
    PaddedWithoutIncrement { from: String, to: String },
    /// More than three segments: everything past the patch was dropped
    SegmentsDiscarded {
        version: String,
        discarded: Vec<String>,
    },
    /// Patch has no leading digits and was treated as 0
    NonNumericPatch { segment: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::PaddedWithoutIncrement { from, to } => {
                write!(
                    f,
                    "Version '{}' has fewer than three segments; padded to '{}' without incrementing",
                    from, to
                )
            }
            BoundaryWarning::SegmentsDiscarded { version, discarded } => {
                write!(
                    f,
                    "Version '{}' has more than three segments; discarding '{}'",
                    version,
                    discarded.join(".")
                )
            }
            BoundaryWarning::NonNumericPatch { segment } => {
                write!(
                    f,
                    "Patch segment '{}' is not numeric; treating it as 0",
                    segment
                )
            }
        }
    }
}
