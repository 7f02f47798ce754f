//! Audio collaborator: fire-and-forget sound effects for revealed characters.

/// A playing (or finished) sound effect.
pub trait SoundHandle {
    /// Whether the sound is still playing.
    fn active(&self) -> bool;

    /// Stop the sound.
    fn stop(&mut self);
}

/// Something that can start sound effects.
pub trait AudioDevice {
    /// Sound description handed to [`AudioDevice::play`].
    type Sound;
    /// Handle to a started sound.
    type Handle: SoundHandle;

    /// Start playing `sound`.
    fn play(&mut self, sound: &Self::Sound) -> Self::Handle;
}

/// Audio device that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

/// Handle returned by [`Silent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentHandle;

impl SoundHandle for SilentHandle {
    fn active(&self) -> bool {
        false
    }

    fn stop(&mut self) {}
}

impl AudioDevice for Silent {
    type Sound = ();
    type Handle = SilentHandle;

    fn play(&mut self, _sound: &()) -> SilentHandle {
        SilentHandle
    }
}
