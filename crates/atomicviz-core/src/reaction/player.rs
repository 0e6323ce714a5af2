use log::info;

use super::catalog::Reaction;
use super::transition::{ReactionFrame, StageTransition};
use crate::config::PlaybackConfig;
use crate::core::time::IntervalTimer;

/// Steps through a reaction's stages on a fixed interval while playing.
///
/// There is a single timer: pausing drops the partial interval, so resuming
/// always waits a full interval before the next advance.
#[derive(Debug, Clone)]
pub struct ReactionPlayer {
    reaction: Reaction,
    stage: usize,
    playing: bool,
    timer: IntervalTimer,
    transition: StageTransition,
    config: PlaybackConfig,
}

impl ReactionPlayer {
    pub fn new(reaction: Reaction, config: PlaybackConfig) -> Self {
        let transition = settled(&reaction, &config);
        Self {
            timer: IntervalTimer::new(config.stage_interval),
            reaction,
            stage: 0,
            playing: false,
            transition,
            config,
        }
    }

    pub fn reaction(&self) -> &Reaction {
        &self.reaction
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn stage_count(&self) -> usize {
        self.reaction.stages.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_at_end(&self) -> bool {
        self.stage + 1 >= self.stage_count()
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.timer.reset();
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Pause and ease back to the first stage.
    pub fn reset(&mut self) {
        self.pause();
        if self.stage != 0 {
            self.go_to(0);
        }
    }

    /// Switch reaction. Playback stops and the first stage shows immediately.
    pub fn select(&mut self, reaction: Reaction) {
        self.pause();
        self.transition = settled(&reaction, &self.config);
        self.reaction = reaction;
        self.stage = 0;
    }

    pub fn tick(&mut self, dt: f32) {
        self.transition.tick(dt);
        if !self.playing {
            return;
        }

        for _ in 0..self.timer.accumulate(dt) {
            if self.is_at_end() {
                self.pause();
                break;
            }
            self.go_to(self.stage + 1);
        }
    }

    fn go_to(&mut self, stage: usize) {
        let Some(next) = self.reaction.stages.get(stage) else {
            return;
        };
        self.transition = StageTransition::between(
            self.reaction.stages.get(self.stage),
            next,
            self.config.transition_duration,
            self.config.easing,
        );
        self.stage = stage;
        info!(
            "reaction '{}': stage {}/{}",
            self.reaction.id,
            stage + 1,
            self.stage_count()
        );
    }

    pub fn frame(&self) -> ReactionFrame {
        let atoms = self.transition.atoms();
        let bonds = self.transition.bonds(&atoms);
        ReactionFrame {
            reaction: self.reaction.id.clone(),
            name: self.reaction.name.clone(),
            equation: self.reaction.equation.clone(),
            stage: self.stage,
            stage_count: self.stage_count(),
            playing: self.playing,
            progress: self.transition.progress(),
            atoms,
            bonds,
        }
    }
}

fn settled(reaction: &Reaction, config: &PlaybackConfig) -> StageTransition {
    reaction
        .stages
        .first()
        .map(|stage| StageTransition::between(None, stage, config.transition_duration, config.easing))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::registry::ElementRegistry;
    use crate::reaction::catalog::ReactionCatalog;

    fn catalog() -> ReactionCatalog {
        ReactionCatalog::load(&ElementRegistry::load().unwrap()).unwrap()
    }

    fn water_player() -> ReactionPlayer {
        let reaction = catalog().get("water-formation").cloned().unwrap();
        ReactionPlayer::new(reaction, PlaybackConfig::default())
    }

    #[test]
    fn advances_once_per_interval() {
        let mut player = water_player();
        player.play();
        player.tick(1.0);
        assert_eq!(player.stage(), 0);
        player.tick(0.5);
        assert_eq!(player.stage(), 1);
        assert!(player.is_playing());
    }

    #[test]
    fn stops_at_last_stage() {
        let mut player = water_player();
        player.play();
        player.tick(1.5);
        player.tick(1.5);
        assert_eq!(player.stage(), 2);
        assert!(player.is_playing());

        player.tick(1.5);
        assert_eq!(player.stage(), 2);
        assert!(!player.is_playing());
    }

    #[test]
    fn long_frame_does_not_overrun() {
        let mut player = water_player();
        player.play();
        player.tick(10.0);
        assert_eq!(player.stage(), 2);
        assert!(!player.is_playing());
    }

    #[test]
    fn pause_cancels_pending_advance() {
        let mut player = water_player();
        player.play();
        player.tick(1.4);
        player.toggle();
        assert!(!player.is_playing());
        player.tick(5.0);
        assert_eq!(player.stage(), 0);

        // Resuming needs a full interval again.
        player.toggle();
        player.tick(0.5);
        assert_eq!(player.stage(), 0);
        player.tick(1.0);
        assert_eq!(player.stage(), 1);
    }

    #[test]
    fn reset_and_select_return_to_first_stage() {
        let mut player = water_player();
        player.play();
        player.tick(3.0);
        assert_eq!(player.stage(), 2);

        player.reset();
        assert_eq!(player.stage(), 0);
        assert!(!player.is_playing());

        let fission = catalog().get("fission").cloned().unwrap();
        player.play();
        player.tick(1.5);
        player.select(fission);
        assert_eq!(player.stage(), 0);
        assert!(!player.is_playing());
        let frame = player.frame();
        assert_eq!(frame.reaction, "fission");
        assert_eq!(frame.stage_count, 3);
        assert_eq!(frame.progress, 1.0);
    }

    #[test]
    fn frame_eases_toward_next_stage() {
        let mut player = water_player();
        player.play();
        player.tick(1.5);
        let start = player.frame();
        assert_eq!(start.stage, 1);
        assert_eq!(start.progress, 0.0);

        player.tick(1.0);
        let end = player.frame();
        assert_eq!(end.progress, 1.0);
        let stage = &player.reaction().stages[1];
        for atom in &end.atoms {
            let target = stage.atom(&atom.id).unwrap();
            assert!((atom.position - target.position).length() < 1e-5);
        }
        assert_eq!(end.bonds.len(), stage.bonds.len());
    }

    #[test]
    fn fission_products_hidden_until_split() {
        let fission = catalog().get("fission").cloned().unwrap();
        let mut player = ReactionPlayer::new(fission, PlaybackConfig::default());
        let first = player.frame();
        assert!(!first.atoms.iter().find(|a| a.id == "kr").unwrap().visible);

        player.play();
        player.tick(3.0);
        player.tick(1.0);
        let last = player.frame();
        assert_eq!(last.stage, 2);
        assert!(last.atoms.iter().find(|a| a.id == "kr").unwrap().visible);
        assert!(!last.atoms.iter().find(|a| a.id == "u1").unwrap().visible);
    }
}
