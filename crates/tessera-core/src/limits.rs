//! Input validation limits for resource protection

use crate::error::Error;

/// Depth used when a neighbor expansion asks for depth 0 or none
pub const DEFAULT_NEIGHBOR_DEPTH: u32 = 1;

/// Maximum neighbor expansion depth (5)
pub const MAX_NEIGHBOR_DEPTH: u32 = 5;

/// Default path search depth (3)
pub const DEFAULT_PATH_DEPTH: u32 = 3;

/// Maximum path search depth (10)
pub const MAX_PATH_DEPTH: u32 = 10;

/// Paths collected when the caller gives no limit. Simple-path enumeration is
/// exponential on dense graphs, so a cap always applies.
pub const DEFAULT_PATH_LIMIT: usize = 50;

/// Maximum paths a caller may request (1000)
pub const MAX_PATH_LIMIT: usize = 1000;

/// Default number of centrality results (100)
pub const DEFAULT_RANK_LIMIT: usize = 100;

/// Entity ceiling for O(V·(V+E)) betweenness runs (5000)
pub const MAX_BETWEENNESS_ENTITIES: usize = 5000;

/// Maximum search page size (1000)
pub const MAX_PAGE_SIZE: usize = 1000;

/// Default visualization node cap (500)
pub const DEFAULT_VIEW_NODES: usize = 500;

/// Maximum visualization node cap (2000)
pub const MAX_VIEW_NODES: usize = 2000;

/// Maximum project name length (64 chars)
pub const MAX_PROJECT_NAME_LEN: usize = 64;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    DepthTooLarge { depth: u32, max: u32 },
    ZeroDepth,
    ZeroLimit,
    LimitTooLarge { limit: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepthTooLarge { depth, max } => {
                write!(f, "Depth too large: {} (max {})", depth, max)
            }
            Self::ZeroDepth => write!(f, "Depth must be at least 1"),
            Self::ZeroLimit => write!(f, "Limit must be at least 1"),
            Self::LimitTooLarge { limit, max } => {
                write!(f, "Limit too large: {} (max {})", limit, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::InvalidArgument(e.to_string())
    }
}

/// Resolve a neighbor depth: missing or 0 means the default, above `max` is rejected
pub fn resolve_neighbor_depth(depth: Option<u32>, max: u32) -> Result<u32, ValidationError> {
    match depth {
        None | Some(0) => Ok(DEFAULT_NEIGHBOR_DEPTH),
        Some(d) if d > max => Err(ValidationError::DepthTooLarge { depth: d, max }),
        Some(d) => Ok(d),
    }
}

/// Validate a path search depth (must be in `1..=max`)
pub fn validate_path_depth(depth: u32, max: u32) -> Result<u32, ValidationError> {
    if depth == 0 {
        return Err(ValidationError::ZeroDepth);
    }
    if depth > max {
        return Err(ValidationError::DepthTooLarge { depth, max });
    }
    Ok(depth)
}

/// Validate an optional result limit (must be in `1..=max` when present)
pub fn validate_limit(limit: Option<usize>, max: usize) -> Result<Option<usize>, ValidationError> {
    match limit {
        Some(0) => Err(ValidationError::ZeroLimit),
        Some(l) if l > max => Err(ValidationError::LimitTooLarge { limit: l, max }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_neighbor_depth() {
        assert_eq!(resolve_neighbor_depth(None, 5), Ok(1));
        assert_eq!(resolve_neighbor_depth(Some(0), 5), Ok(1));
        assert_eq!(resolve_neighbor_depth(Some(3), 5), Ok(3));
        assert!(resolve_neighbor_depth(Some(6), 5).is_err());
    }

    #[test]
    fn test_validate_path_depth() {
        assert_eq!(validate_path_depth(0, 10), Err(ValidationError::ZeroDepth));
        assert_eq!(validate_path_depth(4, 10), Ok(4));
        assert!(validate_path_depth(11, 10).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(None, 10), Ok(None));
        assert_eq!(validate_limit(Some(10), 10), Ok(Some(10)));
        assert_eq!(validate_limit(Some(0), 10), Err(ValidationError::ZeroLimit));
        assert!(validate_limit(Some(11), 10).is_err());
    }

    #[test]
    fn test_validation_maps_to_invalid_argument() {
        let err: Error = ValidationError::ZeroLimit.into();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument);
    }
}
