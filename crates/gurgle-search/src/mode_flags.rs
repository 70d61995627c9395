//! Feature flags gating search modes, and request-mode resolution.
//!
//! Query expansion is noticeably more expensive than the other modes and
//! can return loosely related clips, so it is only served when the
//! deployment enables it.

use std::env;

use serde::Serialize;
use tracing::warn;

use gurgle_core::SearchMode;

/// Environment override for [`SearchModeFlags::enable_query_expansion_mode`].
pub const QUERY_EXPANSION_ENV: &str = "GURGLE_ENABLE_QUERY_EXPANSION";

/// Feature flags controlling which search modes are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchModeFlags {
    /// Allow [`SearchMode::Expanded`]. Requests for it are coerced to
    /// natural mode when disabled.
    pub enable_query_expansion_mode: bool,
}

impl SearchModeFlags {
    pub fn new(enable_query_expansion_mode: bool) -> Self {
        Self {
            enable_query_expansion_mode,
        }
    }

    /// Apply environment overrides on top of configured values.
    ///
    /// `GURGLE_ENABLE_QUERY_EXPANSION` accepts "true", "1", "yes", "on" and
    /// "false", "0", "no", "off" (case-insensitive); anything else is ignored.
    pub fn with_env_overrides(self) -> Self {
        Self {
            enable_query_expansion_mode: parse_bool_env(
                QUERY_EXPANSION_ENV,
                self.enable_query_expansion_mode,
            ),
        }
    }

    /// Whether a mode may be served as requested.
    pub fn allows(&self, mode: SearchMode) -> bool {
        mode != SearchMode::Expanded || self.enable_query_expansion_mode
    }
}

/// Parses a boolean environment variable with a default fallback.
fn parse_bool_env(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|val| match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Mode actually used for a request, and whether the request asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedMode {
    pub mode: SearchMode,
    /// False when the requested mode was unknown or disabled and the
    /// natural mode was substituted.
    pub valid: bool,
}

/// Resolve the raw `mode` request parameter.
///
/// A missing parameter selects natural mode and is valid. Unknown values
/// and a disabled expanded mode fall back to natural mode, flagged invalid.
pub fn resolve_mode(raw: Option<&str>, flags: &SearchModeFlags) -> ResolvedMode {
    let Some(raw) = raw else {
        return ResolvedMode {
            mode: SearchMode::Natural,
            valid: true,
        };
    };

    let requested = raw
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(SearchMode::from_code);

    match requested {
        Some(mode) if flags.allows(mode) => ResolvedMode { mode, valid: true },
        Some(mode) => {
            warn!(
                subsystem = "search",
                component = "mode_flags",
                search_mode = %mode,
                "Requested search mode disabled, using natural mode"
            );
            ResolvedMode {
                mode: SearchMode::Natural,
                valid: false,
            }
        }
        None => ResolvedMode {
            mode: SearchMode::Natural,
            valid: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global, so tests must not run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_disables_expansion() {
        let flags = SearchModeFlags::default();
        assert!(!flags.enable_query_expansion_mode);
        assert!(flags.allows(SearchMode::Natural));
        assert!(flags.allows(SearchMode::Boolean));
        assert!(!flags.allows(SearchMode::Expanded));
    }

    #[test]
    fn test_missing_mode_is_natural_and_valid() {
        let resolved = resolve_mode(None, &SearchModeFlags::default());
        assert_eq!(
            resolved,
            ResolvedMode {
                mode: SearchMode::Natural,
                valid: true
            }
        );
    }

    #[test]
    fn test_known_modes_resolve() {
        let flags = SearchModeFlags::new(true);
        assert_eq!(resolve_mode(Some("1"), &flags).mode, SearchMode::Natural);
        assert_eq!(resolve_mode(Some("2"), &flags).mode, SearchMode::Boolean);
        assert_eq!(resolve_mode(Some("3"), &flags).mode, SearchMode::Expanded);
        assert!(resolve_mode(Some("3"), &flags).valid);
    }

    #[test]
    fn test_expanded_coerced_when_disabled() {
        let resolved = resolve_mode(Some("3"), &SearchModeFlags::new(false));
        assert_eq!(resolved.mode, SearchMode::Natural);
        assert!(!resolved.valid);
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let flags = SearchModeFlags::new(true);
        for raw in ["0", "4", "-1", "boolean", ""] {
            let resolved = resolve_mode(Some(raw), &flags);
            assert_eq!(resolved.mode, SearchMode::Natural, "raw {raw:?}");
            assert!(!resolved.valid, "raw {raw:?}");
        }
    }

    #[test]
    fn test_env_override_enables_expansion() {
        let _guard = ENV_MUTEX.lock().unwrap();

        env::set_var(QUERY_EXPANSION_ENV, "on");
        let flags = SearchModeFlags::new(false).with_env_overrides();
        assert!(flags.enable_query_expansion_mode);

        env::set_var(QUERY_EXPANSION_ENV, "FALSE");
        let flags = SearchModeFlags::new(true).with_env_overrides();
        assert!(!flags.enable_query_expansion_mode);

        env::remove_var(QUERY_EXPANSION_ENV);
    }

    #[test]
    fn test_env_override_invalid_keeps_configured() {
        let _guard = ENV_MUTEX.lock().unwrap();

        env::set_var(QUERY_EXPANSION_ENV, "maybe");
        assert!(SearchModeFlags::new(true).with_env_overrides().enable_query_expansion_mode);
        assert!(!SearchModeFlags::new(false).with_env_overrides().enable_query_expansion_mode);

        env::remove_var(QUERY_EXPANSION_ENV);
        assert!(SearchModeFlags::new(true).with_env_overrides().enable_query_expansion_mode);
    }
}
