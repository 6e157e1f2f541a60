//! RFC 7233-style single-range resolution.
//!
//! # Responsibilities
//! - Parse `bytes=<left>-<right>` with either bound omissible
//! - Resolve suffix/prefix forms against the declared total length
//! - Validate the resulting interval
//!
//! # Design Decisions
//! - A malformed header degrades to the full range instead of erroring,
//!   reproducing the reference service's lenient fallback; clients use
//!   this to probe without committing to a range

/// A resolved byte interval over a resource of declared length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRange {
    /// Inclusive `[first, last]`, with `first <= last <= total - 1`.
    Satisfiable { first: u64, last: u64 },
    /// No valid interval exists; answer `416` with `Content-Range: bytes */<total>`.
    Unsatisfiable,
}

impl ResolvedRange {
    /// Number of bytes the interval covers; zero when unsatisfiable.
    pub fn len(&self) -> u64 {
        match self {
            ResolvedRange::Satisfiable { first, last } => last - first + 1,
            ResolvedRange::Unsatisfiable => 0,
        }
    }

    /// True when the interval spans the entire resource (status `200`
    /// rather than `206`).
    pub fn is_full(&self, total_len: u64) -> bool {
        matches!(
            self,
            ResolvedRange::Satisfiable { first: 0, last } if total_len > 0 && *last == total_len - 1
        )
    }
}

/// Resolve a `Range` header value against a declared total length.
pub fn resolve(header: Option<&str>, total_len: u64) -> ResolvedRange {
    if total_len == 0 {
        return ResolvedRange::Unsatisfiable;
    }

    let (left, right) = match header {
        Some(raw) => parse_bounds(raw),
        None => (None, None),
    };

    let (first, last) = match (left, right) {
        // No range (or malformed): the full resource.
        (None, None) => (0, total_len - 1),
        // Suffix form `bytes=-N`: the final N bytes.
        (None, Some(suffix)) => (total_len.saturating_sub(suffix), total_len - 1),
        // Prefix form `bytes=N-`: from N to the end.
        (Some(first), None) => (first, total_len - 1),
        (Some(first), Some(last)) => (first, last),
    };

    if first > last || last > total_len - 1 {
        ResolvedRange::Unsatisfiable
    } else {
        ResolvedRange::Satisfiable { first, last }
    }
}

/// Parse the raw header into optional left/right bounds. Any syntactic
/// problem yields `(None, None)`, which the caller treats as "no range".
fn parse_bounds(raw: &str) -> (Option<u64>, Option<u64>) {
    let raw = raw.trim();
    if !raw.starts_with("bytes") {
        return (None, None);
    }

    let Some((_, spec)) = raw.split_once('=') else {
        return (None, None);
    };
    let Some((left, right)) = spec.split_once('-') else {
        return (None, None);
    };

    let parse = |bound: &str| -> Result<Option<u64>, ()> {
        if bound.is_empty() {
            return Ok(None);
        }
        bound.trim().parse::<u64>().map(Some).map_err(|_| ())
    };

    match (parse(left), parse(right)) {
        (Ok(left), Ok(right)) => (left, right),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_range() {
        let resolved = resolve(Some("bytes=1-3"), 5);
        assert_eq!(resolved, ResolvedRange::Satisfiable { first: 1, last: 3 });
        assert_eq!(resolved.len(), 3);
        assert!(!resolved.is_full(5));
    }

    #[test]
    fn test_suffix_form() {
        assert_eq!(
            resolve(Some("bytes=-2"), 5),
            ResolvedRange::Satisfiable { first: 3, last: 4 }
        );
    }

    #[test]
    fn test_suffix_longer_than_resource_clamps_to_start() {
        assert_eq!(
            resolve(Some("bytes=-999"), 5),
            ResolvedRange::Satisfiable { first: 0, last: 4 }
        );
    }

    #[test]
    fn test_prefix_form() {
        assert_eq!(
            resolve(Some("bytes=1024-"), 2048),
            ResolvedRange::Satisfiable { first: 1024, last: 2047 }
        );
    }

    #[test]
    fn test_absent_header_is_full_range() {
        let resolved = resolve(None, 5);
        assert_eq!(resolved, ResolvedRange::Satisfiable { first: 0, last: 4 });
        assert!(resolved.is_full(5));
    }

    #[test]
    fn test_malformed_degrades_to_full_range() {
        for raw in ["bytes=abc-def", "bytes", "bytes=1", "octets=1-3", "bytes=x-"] {
            assert_eq!(
                resolve(Some(raw), 5),
                ResolvedRange::Satisfiable { first: 0, last: 4 },
                "header {raw:?}"
            );
        }
    }

    #[test]
    fn test_out_of_bounds_is_unsatisfiable() {
        assert_eq!(resolve(Some("bytes=10-20"), 5), ResolvedRange::Unsatisfiable);
        assert_eq!(resolve(Some("bytes=3-1"), 5), ResolvedRange::Unsatisfiable);
    }

    #[test]
    fn test_zero_suffix_is_unsatisfiable() {
        assert_eq!(resolve(Some("bytes=-0"), 5), ResolvedRange::Unsatisfiable);
    }

    #[test]
    fn test_zero_length_resource_is_unsatisfiable() {
        assert_eq!(resolve(None, 0), ResolvedRange::Unsatisfiable);
    }
}
