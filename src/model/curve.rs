//! Buffer sizes for the curve the secure element implements (NIST P-256)

/// Width of one field element (one affine coordinate, one of R or S)
pub const FIELD_ELEMENT_LEN: usize = 32;

/// Public key length: X and Y concatenated
pub const PUBLIC_KEY_LEN: usize = 2 * FIELD_ELEMENT_LEN;

/// Raw signature length: R and S concatenated
pub const SIGNATURE_LEN: usize = 2 * FIELD_ELEMENT_LEN;

/// Digest length the device signs over
pub const DIGEST_LEN: usize = FIELD_ELEMENT_LEN;
