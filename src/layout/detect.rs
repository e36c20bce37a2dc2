//! Platform Detection - which layout technology the host engine offers.
//!
//! Detection runs once per process through [`Platform::cached`] (or is done
//! by the caller and injected). Two independent facts are gathered:
//!
//! - [`FlexSupport`]: which flex-basis style properties exist. Any of them
//!   makes native flexbox available to fittable containers that opt in.
//! - [`EngineFamily`]: which legacy box model the engine renders, picking the
//!   flex polyfill's strategy. Engines with neither fall back to manual
//!   measurement.
//!
//! # Example
//!
//! ```ignore
//! use spark_layouts::{Platform, UserAgentProbe};
//!
//! let probe = UserAgentProbe::new("Mozilla/5.0 (Windows NT 6.1; Trident/7.0; rv:11.0)");
//! let platform = Platform::cached(&probe);
//! assert!(platform.needs_manual_flex());
//! ```

use std::sync::OnceLock;

use log::{debug, warn};

use crate::error::{LayoutError, Result};

bitflags::bitflags! {
    /// Flex-basis style properties the engine recognises.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct FlexSupport: u8 {
        const STANDARD = 1 << 0;
        const WEBKIT = 1 << 1;
        const MOZ = 1 << 2;
        const MS = 1 << 3;
    }
}

/// Legacy box model rendered by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineFamily {
    /// `display: -webkit-box`.
    Webkit,
    /// `display: -moz-box`.
    Mozilla,
    /// Neither; sizes must be computed by hand.
    Manual,
}

/// Source of raw feature answers.
///
/// A browser host would answer from a scratch element; tests and headless
/// hosts answer from a table or a user-agent string.
pub trait FeatureProbe {
    /// Whether an element's style object has the named property (camelCase).
    fn style_property(&self, name: &str) -> Result<bool>;

    /// Whether `display` accepts the given value.
    fn display_value(&self, value: &str) -> Result<bool>;
}

/// Detected capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub family: EngineFamily,
    pub flex: FlexSupport,
}

const FLEX_BASIS_PROPS: [(FlexSupport, &str); 4] = [
    (FlexSupport::STANDARD, "flexBasis"),
    (FlexSupport::WEBKIT, "webkitFlexBasis"),
    (FlexSupport::MOZ, "mozFlexBasis"),
    (FlexSupport::MS, "msFlexBasis"),
];

static DETECTED: OnceLock<Platform> = OnceLock::new();

/// Probe failures seen during one detection run.
#[derive(Default)]
struct Failures {
    count: usize,
    first: Option<String>,
}

impl Failures {
    fn check(&mut self, answer: Result<bool>) -> bool {
        match answer {
            Ok(found) => found,
            Err(err) => {
                self.count += 1;
                self.first.get_or_insert_with(|| err.to_string());
                false
            }
        }
    }
}

impl Platform {
    /// WebKit-family engine with standard and prefixed flexbox.
    pub const fn webkit() -> Self {
        Self {
            family: EngineFamily::Webkit,
            flex: FlexSupport::STANDARD.union(FlexSupport::WEBKIT),
        }
    }

    /// Gecko-family engine with standard and prefixed flexbox.
    pub const fn mozilla() -> Self {
        Self {
            family: EngineFamily::Mozilla,
            flex: FlexSupport::STANDARD.union(FlexSupport::MOZ),
        }
    }

    /// Engine without any flexbox support.
    pub const fn manual() -> Self {
        Self {
            family: EngineFamily::Manual,
            flex: FlexSupport::empty(),
        }
    }

    /// Native flexbox can be used by fittable containers.
    pub fn flex_available(&self) -> bool {
        !self.flex.is_empty()
    }

    /// The flex polyfill has to measure and size children itself.
    pub fn needs_manual_flex(&self) -> bool {
        self.family == EngineFamily::Manual
    }

    /// Run every probe. Any failure makes the whole detection fail with one
    /// aggregated [`LayoutError::LayoutUnavailable`].
    pub fn detect(probe: &dyn FeatureProbe) -> Result<Self> {
        let mut failures = Failures::default();

        let mut flex = FlexSupport::empty();
        for (flag, prop) in FLEX_BASIS_PROPS {
            if failures.check(probe.style_property(prop)) {
                flex |= flag;
            }
        }

        let moz = failures.check(probe.display_value("-moz-box"));
        let webkit = failures.check(probe.display_value("-webkit-box"));

        if failures.count > 0 {
            return Err(LayoutError::LayoutUnavailable {
                failures: failures.count,
                first: failures.first.unwrap_or_default(),
            });
        }

        let family = if moz {
            EngineFamily::Mozilla
        } else if webkit {
            EngineFamily::Webkit
        } else {
            EngineFamily::Manual
        };

        Ok(Self { family, flex })
    }

    /// Detect once per process and reuse the answer.
    ///
    /// The first caller's probe decides. A failed detection is logged once and
    /// the manual platform is used from then on.
    pub fn cached(probe: &dyn FeatureProbe) -> Self {
        Self::detect_into(&DETECTED, probe)
    }

    /// Detect into `slot` unless it already holds an answer.
    pub(crate) fn detect_into(slot: &OnceLock<Platform>, probe: &dyn FeatureProbe) -> Self {
        *slot.get_or_init(|| match Self::detect(probe) {
            Ok(platform) => {
                debug!("detected {:?} engine, flex support {:?}", platform.family, platform.flex);
                platform
            }
            Err(err) => {
                warn!("{err}; falling back to manual layout");
                Self::manual()
            }
        })
    }
}

// =============================================================================
// USER AGENT PROBE
// =============================================================================

/// Answers feature probes from a user-agent string.
#[derive(Debug, Clone)]
pub struct UserAgentProbe {
    user_agent: String,
}

impl UserAgentProbe {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into().to_ascii_lowercase(),
        }
    }

    fn has(&self, needle: &str) -> bool {
        self.user_agent.contains(needle)
    }

    fn ensure_known(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(LayoutError::Probe("empty user agent".to_string()));
        }
        Ok(())
    }

    fn is_legacy_ie(&self) -> bool {
        self.has("msie ")
    }

    /// IE10 and later: prefixed flexbox, no legacy box.
    fn is_ms_flexbox(&self) -> bool {
        self.has("msie 10") || (self.has("trident/") && !self.is_legacy_ie())
    }

    fn is_webkit(&self) -> bool {
        self.has("applewebkit/") && !self.has("edge/")
    }

    fn is_gecko(&self) -> bool {
        self.has("firefox/") || (self.has("gecko/") && !self.has("like gecko"))
    }
}

impl FeatureProbe for UserAgentProbe {
    fn style_property(&self, name: &str) -> Result<bool> {
        self.ensure_known()?;
        Ok(match name {
            "flexBasis" => !self.is_legacy_ie(),
            "webkitFlexBasis" => self.is_webkit(),
            "mozFlexBasis" => self.is_gecko(),
            "msFlexBasis" => self.is_ms_flexbox(),
            _ => false,
        })
    }

    fn display_value(&self, value: &str) -> Result<bool> {
        self.ensure_known()?;
        Ok(match value {
            "-webkit-box" => self.is_webkit(),
            "-moz-box" => self.is_gecko(),
            "-ms-flexbox" => self.is_ms_flexbox(),
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";
    const IE9: &str = "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; Trident/5.0)";
    const IE10: &str = "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.2; Trident/6.0)";
    const IE11: &str = "Mozilla/5.0 (Windows NT 6.3; Trident/7.0; rv:11.0) like Gecko";

    struct FailingProbe;

    impl FeatureProbe for FailingProbe {
        fn style_property(&self, name: &str) -> Result<bool> {
            Err(LayoutError::Probe(format!("cannot read {name}")))
        }

        fn display_value(&self, _value: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_detect_webkit() {
        let platform = Platform::detect(&UserAgentProbe::new(CHROME)).unwrap();
        assert_eq!(platform.family, EngineFamily::Webkit);
        assert!(platform.flex.contains(FlexSupport::STANDARD | FlexSupport::WEBKIT));
        assert!(platform.flex_available());
        assert!(!platform.needs_manual_flex());
    }

    #[test]
    fn test_detect_mozilla() {
        let platform = Platform::detect(&UserAgentProbe::new(FIREFOX)).unwrap();
        assert_eq!(platform.family, EngineFamily::Mozilla);
        assert!(platform.flex.contains(FlexSupport::MOZ));
    }

    #[test]
    fn test_detect_legacy_ie() {
        let platform = Platform::detect(&UserAgentProbe::new(IE9)).unwrap();
        assert_eq!(platform, Platform::manual());
        assert!(!platform.flex_available());
    }

    #[test]
    fn test_failures_aggregate() {
        let err = Platform::detect(&FailingProbe).unwrap_err();
        assert_eq!(
            err,
            LayoutError::LayoutUnavailable {
                failures: 4,
                first: "probe failed: cannot read flexBasis".to_string(),
            }
        );
    }

    #[test]
    fn test_detect_ie11() {
        let platform = Platform::detect(&UserAgentProbe::new(IE11)).unwrap();
        assert_eq!(platform.family, EngineFamily::Manual);
        assert!(platform.flex.contains(FlexSupport::STANDARD | FlexSupport::MS));
        assert!(platform.flex_available());
        assert!(platform.needs_manual_flex());
    }

    #[test]
    fn test_detect_ie10_prefixed_only() {
        let platform = Platform::detect(&UserAgentProbe::new(IE10)).unwrap();
        assert_eq!(platform.flex, FlexSupport::MS);
        assert_eq!(platform.family, EngineFamily::Manual);
    }

    #[test]
    fn test_failed_detection_falls_back_once() {
        let slot = OnceLock::new();
        assert_eq!(Platform::detect_into(&slot, &FailingProbe), Platform::manual());

        // The first answer sticks, even for a probe that would succeed
        let chrome = UserAgentProbe::new(CHROME);
        assert_eq!(Platform::detect_into(&slot, &chrome), Platform::manual());
    }

    #[test]
    fn test_detection_cached_per_slot() {
        let slot = OnceLock::new();
        assert_eq!(Platform::detect_into(&slot, &UserAgentProbe::new(CHROME)), Platform::webkit());
        assert_eq!(Platform::detect_into(&slot, &UserAgentProbe::new(IE9)), Platform::webkit());
    }

    #[test]
    fn test_empty_user_agent_fails() {
        assert!(Platform::detect(&UserAgentProbe::new("")).is_err());
    }
}
