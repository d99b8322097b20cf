/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Highest page number honoured; larger values are clamped
pub const MAX_PAGE: i64 = 1_000_000;

// =============================================================================
// COMPLAINTS
// =============================================================================

/// Prefix of complaint reference numbers (CMP-YYYY-NNNNNNN)
pub const COMPLAINT_REFERENCE_PREFIX: &str = "CMP";

// =============================================================================
// AUTH
// =============================================================================

/// Token type reported to clients alongside access tokens
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
