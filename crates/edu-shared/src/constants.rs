//! Application-wide constants

/// Header carrying the namespace key on pre-authentication endpoints.
pub const DEFAULT_TENANT_HEADER: &str = "X-Tenant";
/// Header carrying the platform administration key.
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;

/// Schema holding the tenant directory. Never used as a tenant namespace.
pub const DIRECTORY_SCHEMA: &str = "public";
/// PostgreSQL identifier length limit (NAMEDATALEN - 1).
pub const MAX_NAMESPACE_KEY_LENGTH: usize = 63;
