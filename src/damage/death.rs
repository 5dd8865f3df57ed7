//! Player death once the body model says so

use tracing::info;

use crate::core::config::DamageConfig;
use crate::damage::source::DamageSource;
use crate::host::PlayerHost;

/// How a lethal hit ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathOutcome {
    /// The host's death protection saved the player
    Prevented,
    /// A revival collaborator took over
    Bleeding,
    Killed,
}

/// Kill a player whose model reached a death condition.
///
/// The host's totem protection gets the first chance (only with a known
/// source and when allowed by config), then a revival collaborator, and
/// only then is the player killed outright.
pub fn kill_player(
    player: &mut dyn PlayerHost,
    source: Option<&DamageSource>,
    config: &DamageConfig,
) -> DeathOutcome {
    if let Some(source) = source {
        if config.allow_other_healing_items && player.try_totem(source) {
            info!(
                target: "triage::death",
                player = %player.id().0,
                source = %source.kind,
                "death prevented by totem"
            );
            return DeathOutcome::Prevented;
        }
    }

    if let Some(revival) = player.revival() {
        revival.start_bleeding();
        info!(target: "triage::death", player = %player.id().0, "player is bleeding out");
        return DeathOutcome::Bleeding;
    }

    info!(
        target: "triage::death",
        player = %player.id().0,
        source = source.map(|s| s.kind.as_str()).unwrap_or("unknown"),
        "player killed"
    );
    player.kill(source);
    DeathOutcome::Killed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimplePlayer;

    #[test]
    fn test_plain_kill() {
        let mut player = SimplePlayer::new();
        let outcome = kill_player(
            &mut player,
            Some(&DamageSource::mob()),
            &DamageConfig::default(),
        );
        assert_eq!(outcome, DeathOutcome::Killed);
        assert_eq!(player.kills, 1);
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn test_totem_prevents_death() {
        let mut player = SimplePlayer::new();
        player.totems = 1;
        let outcome = kill_player(
            &mut player,
            Some(&DamageSource::mob()),
            &DamageConfig::default(),
        );
        assert_eq!(outcome, DeathOutcome::Prevented);
        assert_eq!(player.kills, 0);
        assert_eq!(player.totems, 0);
    }

    #[test]
    fn test_totem_ignored_when_disallowed_or_sourceless() {
        let config = DamageConfig {
            allow_other_healing_items: false,
            ..DamageConfig::default()
        };
        let mut player = SimplePlayer::new();
        player.totems = 1;
        assert_eq!(
            kill_player(&mut player, Some(&DamageSource::mob()), &config),
            DeathOutcome::Killed
        );

        let mut player = SimplePlayer::new();
        player.totems = 1;
        assert_eq!(kill_player(&mut player, None, &DamageConfig::default()), DeathOutcome::Killed);
        assert_eq!(player.totems, 1);
    }

    #[test]
    fn test_revival_replaces_death() {
        let mut player = SimplePlayer::new().with_revival();
        let outcome = kill_player(
            &mut player,
            Some(&DamageSource::mob()),
            &DamageConfig::default(),
        );
        assert_eq!(outcome, DeathOutcome::Bleeding);
        assert!(player.is_bleeding());
        assert_eq!(player.kills, 0);
    }
}
