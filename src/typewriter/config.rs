//! Typewriter configuration: construction-time settings and per-run options.

use crate::keys::Keys;
use thiserror::Error;

/// Most styles a typewriter can switch between.
pub const MAX_STYLES: usize = 11;

/// Most delegates a typewriter can call.
pub const MAX_DELEGATES: usize = 11;

/// A side effect triggered by a delegate control code.
///
/// It receives its own index, so one function can serve several codes.
pub type Delegate<'a> = Box<dyn FnMut(usize) + 'a>;

/// Construction-time configuration.
pub struct TypewriterConfig<'a, St> {
    /// Key that ends a manual pause.
    pub resume_key: Keys,
    /// Key that fast-forwards to the end.
    pub skip_key: Keys,
    /// Styles selectable by style-change codes; index 0 is the initial one.
    ///
    /// Empty means "the shaper's default style".
    pub styles: Vec<St>,
    /// Delegates callable by delegate codes.
    pub delegates: Vec<Delegate<'a>>,
}

impl<St> Default for TypewriterConfig<'_, St> {
    fn default() -> Self {
        Self {
            resume_key: Keys::A,
            skip_key: Keys::B,
            styles: Vec::new(),
            delegates: Vec::new(),
        }
    }
}

impl<St> std::fmt::Debug for TypewriterConfig<'_, St> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypewriterConfig")
            .field("resume_key", &self.resume_key)
            .field("skip_key", &self.skip_key)
            .field("styles", &self.styles.len())
            .field("delegates", &self.delegates.len())
            .finish()
    }
}

impl<St> TypewriterConfig<'_, St> {
    /// Check the configuration against the typewriter's limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.styles.len() > MAX_STYLES {
            return Err(ConfigError::TooManyStyles {
                count: self.styles.len(),
                max: MAX_STYLES,
            });
        }
        if self.delegates.len() > MAX_DELEGATES {
            return Err(ConfigError::TooManyDelegates {
                count: self.delegates.len(),
                max: MAX_DELEGATES,
            });
        }
        check_keys(self.resume_key, self.skip_key)
    }
}

/// Resume and skip keys must not share a key.
pub fn check_keys(resume: Keys, skip: Keys) -> Result<(), ConfigError> {
    if resume.intersects(skip) {
        return Err(ConfigError::OverlappingKeys { resume, skip });
    }
    Ok(())
}

/// Invalid typewriter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// More styles than [`MAX_STYLES`].
    #[error("too many styles: {count} (max {max})")]
    TooManyStyles {
        /// Styles given.
        count: usize,
        /// Styles allowed.
        max: usize,
    },
    /// More delegates than [`MAX_DELEGATES`].
    #[error("too many delegates: {count} (max {max})")]
    TooManyDelegates {
        /// Delegates given.
        count: usize,
        /// Delegates allowed.
        max: usize,
    },
    /// Resume and skip keys overlap.
    #[error("resume key {resume:?} and skip key {skip:?} overlap")]
    OverlappingKeys {
        /// Configured resume key.
        resume: Keys,
        /// Configured skip key.
        skip: Keys,
    },
}

/// Options for one typewriting run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions<Snd> {
    /// Ticks needed to reveal one step. Must be positive.
    pub wait_ticks: u32,
    /// Sound played when a tick reveals non-whitespace text.
    pub sound: Option<Snd>,
    /// Widest a line may get.
    pub max_line_width: i32,
    /// Vertical distance between lines.
    pub line_spacing: f32,
    /// Lines per page. Must be positive.
    pub max_lines: usize,
}

impl<Snd> Default for RunOptions<Snd> {
    fn default() -> Self {
        Self {
            wait_ticks: 1,
            sound: None,
            max_line_width: i32::MAX,
            line_spacing: 1.0,
            max_lines: usize::MAX,
        }
    }
}
