//! Email addresses as URL path segments.
//!
//! Some HTTP stacks treat the part after the last `.` of a path segment as a
//! file extension, so clients replace every `.` of an email with `-dot-`
//! before putting it in `/users/by-email/{email}`.

/// Sentinel that stands for a literal `.` in an email path segment.
pub const DOT_SENTINEL: &str = "-dot-";

/// Restores an email address from its path-segment form.
///
/// The segment is expected to be percent-decoded already.
pub fn decode_email_segment(segment: &str) -> String {
    segment.replace(DOT_SENTINEL, ".")
}

/// Builds the path-segment form of an email address.
pub fn encode_email_segment(email: &str) -> String {
    email.replace('.', DOT_SENTINEL)
}
