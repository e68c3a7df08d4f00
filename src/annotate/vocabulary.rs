//! Fixed action-unit vocabulary and intensity wording.
//!
//! The vocabulary is an explicit ordered list, not a map, so phrase output
//! order is identical on every run and every platform.

/// Human-readable label for each supported action unit, in emission order.
pub const UNIT_VOCABULARY: &[(&str, &str)] = &[
    ("AU01", "Inner Brow Raiser"),
    ("AU02", "Outer Brow Raiser"),
    ("AU04", "Brow Lowerer"),
    ("AU05", "Upper Lid Raiser"),
    ("AU06", "Cheek Raiser"),
    ("AU07", "Lid Tightener"),
    ("AU09", "Nose Wrinkler"),
    ("AU10", "Upper Lip Raiser"),
    ("AU12", "Lip Corner Puller"),
    ("AU14", "Dimpler"),
    ("AU15", "Lip Corner Depressor"),
    ("AU17", "Chin Raiser"),
    ("AU20", "Lip stretcher"),
    ("AU23", "Lip Tightener"),
    ("AU25", "Lips Part"),
    ("AU26", "Jaw Drop"),
    ("AU28", "Lip Suck"),
    ("AU45", "Blink"),
];

/// Map a continuous intensity to its qualifier word.
pub fn intensity_qualifier(value: f64) -> &'static str {
    if value < 0.2 {
        "barely"
    } else if value < 1.0 {
        "slightly"
    } else if value < 2.5 {
        "moderately"
    } else if value < 5.0 {
        "strongly"
    } else {
        "very strongly"
    }
}
