//! Injectable side-effect collaborators: placeholder imagery and the
//! dice-roll audio cue. Kept behind traits so the arena stays testable
//! without a browser, audio device, or network.

/// Derives a deterministic placeholder image URL for a combatant name.
/// Used when the model supplies no image or the image fails to load.
pub trait ImageUrlResolver: Send + Sync {
    fn image_url(&self, name: &str) -> String;
}

/// Seeded picsum.photos placeholder, keyed by the combatant name.
#[derive(Debug, Clone, Default)]
pub struct PicsumResolver;

impl ImageUrlResolver for PicsumResolver {
    fn image_url(&self, name: &str) -> String {
        format!(
            "https://picsum.photos/seed/{}/1200/800",
            urlencoding::encode(name)
        )
    }
}

/// Plays the dice-roll cue when the randomizer fires. Fire-and-forget;
/// playback failure is ignored.
pub trait AudioPlayer: Send + Sync {
    fn play_dice_roll(&self);
}

/// No-op player for headless environments and tests.
#[derive(Debug, Clone, Default)]
pub struct SilentAudioPlayer;

impl AudioPlayer for SilentAudioPlayer {
    fn play_dice_roll(&self) {}
}
