// placement/engine.rs

use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::Rng;
use std::time::Duration;

use super::geometry::{CenterRange, ControlId, ControlRect, GeometryError, GeometryProvider, Size};
use super::tier::DifficultyTier;
use crate::config::PlacementConfig;

/// How a center was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementSource {
    /// Deterministic startup/resize position
    Initial,
    /// Random draw number `attempt` (0-based) passed every check
    Sampled { attempt: u32 },
    /// Near-center jitter after sampling was impossible or exhausted
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    RetryBudgetExhausted,
    Geometry(GeometryError),
}

/// A position (and presentation) to apply to the evading control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Center, container-relative
    pub center: Vec2,
    pub tier: DifficultyTier,
    /// Play the one-shot bump animation
    pub bump: bool,
    pub source: PlacementSource,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerOutcome {
    /// Dropped: the previous trigger's settle window is still open
    Ignored,
    Moved(Placement),
}

/// Owns escalation and placement history for one evading control
#[derive(Resource, Debug, Clone)]
pub struct PlacementEngine {
    config: PlacementConfig,
    reduced_motion: bool,
    /// Successful evasions so far; never decreases and saturates at `u32::MAX`
    escalation: u32,
    /// Most recent chosen center, if any
    last_center: Option<Vec2>,
    /// Triggers before this instant are dropped
    settle_until: Option<Duration>,
}

impl PlacementEngine {
    pub fn new(config: PlacementConfig, reduced_motion: bool) -> Self {
        PlacementEngine {
            config,
            reduced_motion,
            escalation: 0,
            last_center: None,
            settle_until: None,
        }
    }

    // === Query Methods ===

    pub fn escalation(&self) -> u32 {
        self.escalation
    }

    pub fn last_center(&self) -> Option<Vec2> {
        self.last_center
    }

    pub fn tier(&self) -> DifficultyTier {
        DifficultyTier::for_count(self.escalation)
    }

    pub fn is_settling(&self, now: Duration) -> bool {
        self.settle_until.is_some_and(|until| now < until)
    }

    // === Entry Points ===

    /// React to an interaction on the evading control.
    ///
    /// Always yields an in-bounds center unless the call lands inside the
    /// settle window, in which case nothing changes.
    pub fn trigger<G, R>(&mut self, now: Duration, geometry: &G, rng: &mut R) -> TriggerOutcome
    where
        G: GeometryProvider + ?Sized,
        R: Rng,
    {
        if self.is_settling(now) {
            log::debug!("Trigger at {:?} dropped, still settling", now);
            return TriggerOutcome::Ignored;
        }

        self.escalation = self.escalation.saturating_add(1);

        let (center, source) = self.pick_safe_position(geometry, rng);
        self.last_center = Some(center);
        self.settle_until = Some(now + self.config.settle_window(self.reduced_motion));

        if let PlacementSource::Fallback(reason) = source {
            log::debug!("Evasion #{} used fallback: {:?}", self.escalation, reason);
        }

        TriggerOutcome::Moved(Placement {
            center,
            tier: self.tier(),
            bump: !self.reduced_motion,
            source,
        })
    }

    /// Deterministic starting spot, used at startup and after every resize.
    ///
    /// Records the center as history but leaves escalation untouched.
    pub fn initial_placement<G>(&mut self, geometry: &G) -> Placement
    where
        G: GeometryProvider + ?Sized,
    {
        let pad = self.config.initial_padding;
        let container = geometry
            .container_bounds()
            .unwrap_or(Size::new(0.0, 0.0));
        let evade = evade_size(geometry);
        let range = CenterRange::new(container, evade, pad);

        let wide_center = || {
            range.clamp(Vec2::new(
                container.width * self.config.wide_anchor[0],
                container.height * self.config.wide_anchor[1],
            ))
        };

        let center = if geometry.narrow_layout() {
            match geometry.control_bounds(ControlId::Accept) {
                Ok(accept) => range.clamp(Vec2::new(
                    accept.left + accept.width / 2.0,
                    accept.bottom + self.config.narrow_gap + evade.height / 2.0,
                )),
                Err(_) => wide_center(),
            }
        } else {
            wide_center()
        };

        self.last_center = Some(center);

        Placement {
            center,
            tier: self.tier(),
            bump: false,
            source: PlacementSource::Initial,
        }
    }

    // === Search ===

    fn pick_safe_position<G, R>(&self, geometry: &G, rng: &mut R) -> (Vec2, PlacementSource)
    where
        G: GeometryProvider + ?Sized,
        R: Rng,
    {
        let pad = self.config.padding;

        let (container, evade, accept) = match measure(geometry) {
            Ok(measured) => measured,
            Err(err) => {
                let container = geometry
                    .container_bounds()
                    .unwrap_or(Size::new(0.0, 0.0));
                let range = CenterRange::new(container, evade_size(geometry), pad);
                let center = self.fallback_center(&range, rng);
                return (center, PlacementSource::Fallback(FallbackReason::Geometry(err)));
            }
        };

        let range = CenterRange::new(container, evade, pad);
        let min_travel = self.config.min_travel(container.width);

        for attempt in 0..self.config.retry_budget {
            let center = range.lerp(Vec2::new(rng.random::<f32>(), rng.random::<f32>()));
            let candidate = ControlRect::from_center(center, evade);

            if candidate.intersects(&accept, self.config.avoidance_margin) {
                continue;
            }

            let too_close_to_last = self
                .last_center
                .is_some_and(|last| center.distance(last) < min_travel);
            if too_close_to_last {
                continue;
            }

            return (center, PlacementSource::Sampled { attempt });
        }

        (
            self.fallback_center(&range, rng),
            PlacementSource::Fallback(FallbackReason::RetryBudgetExhausted),
        )
    }

    fn fallback_center<R: Rng>(&self, range: &CenterRange, rng: &mut R) -> Vec2 {
        let [jitter_x, jitter_y] = self.config.fallback_jitter;
        let jitter = Vec2::new(
            (rng.random::<f32>() - 0.5) * jitter_x,
            (rng.random::<f32>() - 0.5) * jitter_y,
        );
        range.clamp(range.midpoint() + jitter)
    }
}

fn evade_size<G: GeometryProvider + ?Sized>(geometry: &G) -> Size {
    geometry
        .control_bounds(ControlId::Evade)
        .map(|rect| rect.size())
        .unwrap_or(Size::new(0.0, 0.0))
}

/// Everything the random search needs, or the first thing that's missing
fn measure<G: GeometryProvider + ?Sized>(
    geometry: &G,
) -> Result<(Size, Size, ControlRect), GeometryError> {
    let container = geometry.container_bounds()?;
    if !container.is_measurable() {
        return Err(GeometryError::ContainerUnavailable);
    }
    let evade = geometry.control_bounds(ControlId::Evade)?.size();
    let accept = geometry.control_bounds(ControlId::Accept)?;
    Ok((container, evade, accept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EVADE: Size = Size {
        width: 120.0,
        height: 52.0,
    };

    /// Synthetic layout standing in for the rendering layer
    struct FixedGeometry {
        container: Size,
        accept: Option<ControlRect>,
        narrow: bool,
    }

    impl FixedGeometry {
        fn wide(container: Size, accept_center: Vec2) -> Self {
            FixedGeometry {
                container,
                accept: Some(ControlRect::from_center(accept_center, Size::new(140.0, 56.0))),
                narrow: false,
            }
        }
    }

    impl GeometryProvider for FixedGeometry {
        fn container_bounds(&self) -> Result<Size, GeometryError> {
            Ok(self.container)
        }

        fn control_bounds(&self, id: ControlId) -> Result<ControlRect, GeometryError> {
            match id {
                ControlId::Accept => self.accept.ok_or(GeometryError::ControlUnavailable(id)),
                ControlId::Evade => Ok(ControlRect::from_center(Vec2::ZERO, EVADE)),
            }
        }

        fn narrow_layout(&self) -> bool {
            self.narrow
        }
    }

    fn engine() -> PlacementEngine {
        PlacementEngine::new(PlacementConfig::default(), false)
    }

    /// Far enough apart that no settle window is ever open
    fn tick(i: u64) -> Duration {
        Duration::from_secs(i)
    }

    fn moved(outcome: TriggerOutcome) -> Placement {
        match outcome {
            TriggerOutcome::Moved(placement) => placement,
            TriggerOutcome::Ignored => panic!("Trigger was unexpectedly ignored"),
        }
    }

    fn assert_inside_padding(center: Vec2, container: Size, pad: f32) {
        let rect = ControlRect::from_center(center, EVADE);
        let eps = 1e-3;
        assert!(rect.left >= pad - eps, "left {} escapes padding", rect.left);
        assert!(rect.top >= pad - eps, "top {} escapes padding", rect.top);
        assert!(rect.right <= container.width - pad + eps, "right {} escapes", rect.right);
        assert!(rect.bottom <= container.height - pad + eps, "bottom {} escapes", rect.bottom);
    }

    #[test]
    fn test_positions_stay_within_padded_container() {
        let container = Size::new(800.0, 600.0);
        let geometry = FixedGeometry::wide(container, Vec2::new(260.0, 330.0));
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = engine();

        for i in 0..300 {
            let placement = moved(engine.trigger(tick(i), &geometry, &mut rng));
            assert_inside_padding(placement.center, container, 10.0);
        }
    }

    #[test]
    fn test_small_container_still_bounded() {
        // Container only just fits the control plus padding on one axis
        let container = Size::new(140.0, 200.0);
        let geometry = FixedGeometry::wide(container, Vec2::new(70.0, 28.0));
        let mut rng = StdRng::seed_from_u64(11);
        let mut engine = engine();

        for i in 0..100 {
            let placement = moved(engine.trigger(tick(i), &geometry, &mut rng));
            assert_inside_padding(placement.center, container, 10.0);
        }
    }

    #[test]
    fn test_sampled_positions_avoid_accept_control() {
        let container = Size::new(800.0, 600.0);
        let geometry = FixedGeometry::wide(container, Vec2::new(260.0, 330.0));
        let accept = geometry.accept.unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut engine = engine();

        for i in 0..300 {
            let placement = moved(engine.trigger(tick(i), &geometry, &mut rng));
            assert!(
                matches!(placement.source, PlacementSource::Sampled { .. }),
                "Roomy container should never need the fallback"
            );
            let rect = ControlRect::from_center(placement.center, EVADE);
            assert!(!rect.intersects(&accept, 18.0));
        }
    }

    #[test]
    fn test_consecutive_positions_are_far_apart() {
        let container = Size::new(800.0, 600.0);
        let geometry = FixedGeometry::wide(container, Vec2::new(260.0, 330.0));
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = engine();
        let min_travel = PlacementConfig::default().min_travel(container.width);

        let mut previous = engine.initial_placement(&geometry).center;
        for i in 0..300 {
            let placement = moved(engine.trigger(tick(i), &geometry, &mut rng));
            assert!(placement.center.distance(previous) >= min_travel);
            previous = placement.center;
        }
    }

    #[test]
    fn test_escalation_counts_only_successful_triggers() {
        let geometry = FixedGeometry::wide(Size::new(800.0, 600.0), Vec2::new(260.0, 330.0));
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = engine();

        let start = Duration::from_millis(1000);
        assert!(matches!(
            engine.trigger(start, &geometry, &mut rng),
            TriggerOutcome::Moved(_)
        ));
        assert_eq!(engine.escalation(), 1);

        // Inside the 260ms settle window: dropped, not queued
        let during = start + Duration::from_millis(100);
        let before = engine.last_center();
        assert_eq!(engine.trigger(during, &geometry, &mut rng), TriggerOutcome::Ignored);
        assert_eq!(engine.escalation(), 1);
        assert_eq!(engine.last_center(), before);
        assert!(engine.is_settling(during));

        let after = start + Duration::from_millis(260);
        assert!(!engine.is_settling(after));
        assert!(matches!(
            engine.trigger(after, &geometry, &mut rng),
            TriggerOutcome::Moved(_)
        ));
        assert_eq!(engine.escalation(), 2);
    }

    #[test]
    fn test_escalation_is_monotonic() {
        let geometry = FixedGeometry::wide(Size::new(800.0, 600.0), Vec2::new(260.0, 330.0));
        let mut rng = StdRng::seed_from_u64(9);
        let mut engine = engine();

        let mut last = engine.escalation();
        for ms in (0..5000).step_by(70) {
            engine.trigger(Duration::from_millis(ms), &geometry, &mut rng);
            assert!(engine.escalation() >= last);
            assert!(engine.escalation() - last <= 1);
            last = engine.escalation();
        }
        assert!(last > 0);
    }

    #[test]
    fn test_tier_follows_escalation() {
        let geometry = FixedGeometry::wide(Size::new(800.0, 600.0), Vec2::new(260.0, 330.0));
        let mut rng = StdRng::seed_from_u64(5);
        let mut engine = engine();

        let tiers: Vec<_> = (0..8)
            .map(|i| moved(engine.trigger(tick(i), &geometry, &mut rng)).tier)
            .collect();

        assert_eq!(tiers[2], DifficultyTier::Calm); // count 3
        assert_eq!(tiers[3], DifficultyTier::Wary); // count 4
        assert_eq!(tiers[5], DifficultyTier::Wary); // count 6
        assert_eq!(tiers[6], DifficultyTier::Elusive); // count 7
    }

    #[test]
    fn test_reduced_motion_skips_bump_and_settle() {
        let geometry = FixedGeometry::wide(Size::new(800.0, 600.0), Vec2::new(260.0, 330.0));
        let mut rng = StdRng::seed_from_u64(2);
        let mut engine = PlacementEngine::new(PlacementConfig::default(), true);

        let now = Duration::from_millis(500);
        let first = moved(engine.trigger(now, &geometry, &mut rng));
        let second = moved(engine.trigger(now, &geometry, &mut rng));

        assert!(!first.bump && !second.bump);
        assert_eq!(engine.escalation(), 2);
    }

    #[test]
    fn test_fallback_when_every_candidate_collides() {
        let container = Size::new(200.0, 100.0);
        // Accept control covers the whole container
        let geometry = FixedGeometry {
            container,
            accept: Some(ControlRect::from_center(Vec2::new(100.0, 50.0), container)),
            narrow: false,
        };
        let mut rng = StdRng::seed_from_u64(99);
        let mut engine = engine();

        for i in 0..50 {
            let placement = moved(engine.trigger(tick(i), &geometry, &mut rng));
            assert_eq!(
                placement.source,
                PlacementSource::Fallback(FallbackReason::RetryBudgetExhausted)
            );
            assert_inside_padding(placement.center, container, 10.0);
        }
        assert_eq!(engine.escalation(), 50);
    }

    #[test]
    fn test_unmeasurable_container_degrades_to_fallback() {
        let geometry = FixedGeometry {
            container: Size::new(0.0, 0.0),
            accept: None,
            narrow: false,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut engine = engine();

        let placement = moved(engine.trigger(tick(0), &geometry, &mut rng));

        assert_eq!(
            placement.source,
            PlacementSource::Fallback(FallbackReason::Geometry(
                GeometryError::ContainerUnavailable
            ))
        );
        assert!(placement.center.is_finite());
        assert_eq!(engine.last_center(), Some(placement.center));
    }

    #[test]
    fn test_missing_accept_control_degrades_to_fallback() {
        let geometry = FixedGeometry {
            container: Size::new(800.0, 600.0),
            accept: None,
            narrow: false,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut engine = engine();

        let placement = moved(engine.trigger(tick(0), &geometry, &mut rng));

        assert_eq!(
            placement.source,
            PlacementSource::Fallback(FallbackReason::Geometry(
                GeometryError::ControlUnavailable(ControlId::Accept)
            ))
        );
        // Near the middle: jitter is at most 40 x 20 either way
        assert!((placement.center.x - 400.0).abs() <= 40.0);
        assert!((placement.center.y - 300.0).abs() <= 20.0);
    }

    #[test]
    fn test_initial_placement_wide() {
        let geometry = FixedGeometry::wide(Size::new(1000.0, 600.0), Vec2::new(320.0, 330.0));
        let mut engine = engine();

        let placement = engine.initial_placement(&geometry);

        assert!((placement.center.x - 720.0).abs() < 1e-3);
        assert!((placement.center.y - 330.0).abs() < 1e-3);
        assert_eq!(placement.source, PlacementSource::Initial);
        assert!(!placement.bump);
        assert_eq!(engine.escalation(), 0);
        assert_eq!(engine.last_center(), Some(placement.center));
    }

    #[test]
    fn test_initial_placement_wide_clamps_to_bounds() {
        // 0.72 * 150 = 108 would push the right edge past 150 - 12
        let geometry = FixedGeometry::wide(Size::new(150.0, 400.0), Vec2::new(75.0, 100.0));
        let mut engine = engine();

        let placement = engine.initial_placement(&geometry);

        assert!((placement.center.x - 78.0).abs() < 1e-3);
    }

    #[test]
    fn test_initial_placement_narrow_sits_below_accept() {
        let geometry = FixedGeometry {
            container: Size::new(400.0, 700.0),
            accept: Some(ControlRect::from_center(
                Vec2::new(200.0, 272.0),
                Size::new(140.0, 56.0),
            )),
            narrow: true,
        };
        let mut engine = engine();

        let placement = engine.initial_placement(&geometry);

        // bottom 300 + gap 12 + half height 26
        assert!((placement.center.x - 200.0).abs() < 1e-3);
        assert!((placement.center.y - 338.0).abs() < 1e-3);
    }

    #[test]
    fn test_initial_placement_keeps_escalation_tier() {
        let geometry = FixedGeometry::wide(Size::new(800.0, 600.0), Vec2::new(260.0, 330.0));
        let mut rng = StdRng::seed_from_u64(4);
        let mut engine = engine();

        for i in 0..5 {
            engine.trigger(tick(i), &geometry, &mut rng);
        }
        let placement = engine.initial_placement(&geometry);

        assert_eq!(engine.escalation(), 5);
        assert_eq!(placement.tier, DifficultyTier::Wary);
    }

    #[test]
    fn test_resize_placement_overwrites_history() {
        let geometry = FixedGeometry::wide(Size::new(800.0, 600.0), Vec2::new(260.0, 330.0));
        let mut rng = StdRng::seed_from_u64(8);
        let mut engine = engine();

        for i in 0..3 {
            engine.trigger(tick(i), &geometry, &mut rng);
        }
        let resized = FixedGeometry::wide(Size::new(1000.0, 600.0), Vec2::new(320.0, 330.0));
        let placement = engine.initial_placement(&resized);

        assert_eq!(engine.last_center(), Some(placement.center));
        assert!((placement.center.x - 720.0).abs() < 1e-3);
        assert_eq!(engine.escalation(), 3);
    }

    #[test]
    fn test_fallback_when_min_distance_rules_out_every_candidate() {
        // 140 x 72 minus padding leaves exactly one legal center: (70, 36)
        let container = Size::new(140.0, 72.0);
        let geometry = FixedGeometry::wide(container, Vec2::new(1000.0, 1000.0));
        let mut rng = StdRng::seed_from_u64(21);
        let mut engine = engine();

        // Initial inset is 12, so this lands 2px off the single point
        let initial = engine.initial_placement(&geometry);
        assert!((initial.center - Vec2::new(72.0, 38.0)).length() < 1e-3);

        for i in 0..5 {
            let placement = moved(engine.trigger(tick(i), &geometry, &mut rng));
            assert_eq!(
                placement.source,
                PlacementSource::Fallback(FallbackReason::RetryBudgetExhausted)
            );
            assert_inside_padding(placement.center, container, 10.0);
            assert_eq!(engine.escalation(), i as u32 + 1);
        }
    }

    #[test]
    fn test_escalation_saturates() {
        let geometry = FixedGeometry::wide(Size::new(800.0, 600.0), Vec2::new(260.0, 330.0));
        let mut rng = StdRng::seed_from_u64(6);
        let mut engine = engine();
        engine.escalation = u32::MAX;

        let placement = moved(engine.trigger(tick(0), &geometry, &mut rng));

        assert_eq!(engine.escalation(), u32::MAX);
        assert_eq!(placement.tier, DifficultyTier::Elusive);
    }
}
