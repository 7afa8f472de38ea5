//! Obstacles and the field that spawns, scrolls and retires them
//!
//! Ground obstacles (cacti) sit on the ground line in one of four sizes.
//! Aerial obstacles (birds) share one size and fly at one of three
//! altitudes, flapping through a two-frame cycle.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;
use super::state::{FrameCycle, PassCounts};
use crate::consts::*;
use crate::tuning::Tuning;

/// Every named obstacle sub-type, as reported in pass counts and game reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleVariant {
    CactusStandard,
    CactusTall,
    CactusWide,
    CactusTallWide,
    BirdLow,
    BirdMid,
    BirdHigh,
}

impl ObstacleVariant {
    pub const ALL: [ObstacleVariant; 7] = [
        ObstacleVariant::CactusStandard,
        ObstacleVariant::CactusTall,
        ObstacleVariant::CactusWide,
        ObstacleVariant::CactusTallWide,
        ObstacleVariant::BirdLow,
        ObstacleVariant::BirdMid,
        ObstacleVariant::BirdHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleVariant::CactusStandard => "cactus_standard",
            ObstacleVariant::CactusTall => "cactus_tall",
            ObstacleVariant::CactusWide => "cactus_wide",
            ObstacleVariant::CactusTallWide => "cactus_tall_wide",
            ObstacleVariant::BirdLow => "bird_low",
            ObstacleVariant::BirdMid => "bird_mid",
            ObstacleVariant::BirdHigh => "bird_high",
        }
    }

    /// Look up a variant by its report name
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn is_aerial(&self) -> bool {
        matches!(
            self,
            ObstacleVariant::BirdLow | ObstacleVariant::BirdMid | ObstacleVariant::BirdHigh
        )
    }
}

/// Cactus sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundVariant {
    Standard,
    Tall,
    Wide,
    TallWide,
}

impl GroundVariant {
    pub const ALL: [GroundVariant; 4] = [
        GroundVariant::Standard,
        GroundVariant::Tall,
        GroundVariant::Wide,
        GroundVariant::TallWide,
    ];

    /// Width, height
    pub fn size(&self) -> Vec2 {
        match self {
            GroundVariant::Standard => Vec2::new(40.0, 71.0),
            GroundVariant::Tall => Vec2::new(48.0, 95.0),
            GroundVariant::Wide => Vec2::new(105.0, 71.0),
            GroundVariant::TallWide => Vec2::new(102.0, 95.0),
        }
    }

    pub fn variant(&self) -> ObstacleVariant {
        match self {
            GroundVariant::Standard => ObstacleVariant::CactusStandard,
            GroundVariant::Tall => ObstacleVariant::CactusTall,
            GroundVariant::Wide => ObstacleVariant::CactusWide,
            GroundVariant::TallWide => ObstacleVariant::CactusTallWide,
        }
    }
}

/// Bird altitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AerialVariant {
    Low,
    Mid,
    High,
}

impl AerialVariant {
    pub const ALL: [AerialVariant; 3] = [AerialVariant::Low, AerialVariant::Mid, AerialVariant::High];

    /// Height of the bird's bottom edge above the ground line
    pub fn altitude(&self) -> f32 {
        match self {
            AerialVariant::Low => 20.0,
            AerialVariant::Mid => 50.0,
            AerialVariant::High => 80.0,
        }
    }

    pub fn variant(&self) -> ObstacleVariant {
        match self {
            AerialVariant::Low => ObstacleVariant::BirdLow,
            AerialVariant::Mid => ObstacleVariant::BirdMid,
            AerialVariant::High => ObstacleVariant::BirdHigh,
        }
    }
}

/// Kind-specific obstacle payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    Ground(GroundVariant),
    Aerial {
        altitude: AerialVariant,
        flap: FrameCycle,
    },
}

impl ObstacleKind {
    /// Bird at the given altitude, wings at frame 0
    pub fn aerial(altitude: AerialVariant) -> Self {
        ObstacleKind::Aerial {
            altitude,
            flap: FrameCycle::default(),
        }
    }

    pub fn variant(&self) -> ObstacleVariant {
        match self {
            ObstacleKind::Ground(v) => v.variant(),
            ObstacleKind::Aerial { altitude, .. } => altitude.variant(),
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Ground(v) => v.size(),
            ObstacleKind::Aerial { .. } => Vec2::new(AERIAL_WIDTH, AERIAL_HEIGHT),
        }
    }

    /// Bottom edge for this kind given the ground line
    pub fn spawn_bottom(&self, ground_y: f32) -> f32 {
        match self {
            ObstacleKind::Ground(_) => ground_y,
            ObstacleKind::Aerial { altitude, .. } => ground_y - altitude.altitude(),
        }
    }
}

/// A live obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge x, bottom edge y (fixed at spawn)
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, x: f32, bottom: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, bottom),
            size: kind.size(),
        }
    }

    pub fn variant(&self) -> ObstacleVariant {
        self.kind.variant()
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Right edge has crossed the left screen boundary
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    /// Current animation frame (always 0 for cacti)
    pub fn frame(&self) -> usize {
        match self.kind {
            ObstacleKind::Ground(_) => 0,
            ObstacleKind::Aerial { flap, .. } => flap.frame,
        }
    }

    /// Scroll left by the world speed and advance wing animation
    pub fn advance(&mut self, dt: f64, speed: f32, flap_interval_ms: f64, flap_frames: usize) {
        self.pos.x -= speed;
        if let ObstacleKind::Aerial { flap, .. } = &mut self.kind {
            flap.advance(dt, flap_interval_ms, flap_frames);
        }
    }
}

/// Field geometry and spacing rules, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// New obstacles appear with their left edge here (right screen edge)
    pub spawn_x: f32,
    pub ground_y: f32,
    pub spacing_base: f32,
    pub spacing_speed_factor: f32,
    pub flap_interval_ms: f64,
    pub flap_frames: usize,
}

impl FieldParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            spawn_x: tuning.world_width,
            ground_y: tuning.ground_y(),
            spacing_base: tuning.spacing_base,
            spacing_speed_factor: tuning.spacing_speed_factor,
            flap_interval_ms: tuning.aerial_frame_interval_ms,
            flap_frames: tuning.aerial_frame_count,
        }
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

/// What happened when the spawn timer expired
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnAttempt {
    /// A new obstacle was appended; `gap` is the distance from the previous
    /// obstacle to the spawn point (None when the field was empty)
    Spawned {
        id: u32,
        variant: ObstacleVariant,
        gap: Option<f32>,
    },
    /// The last obstacle was still too close to the spawn point
    Blocked { gap: f32, required: f32 },
}

/// Result of one field update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdate {
    pub attempt: Option<SpawnAttempt>,
    /// Variants retired this tick, in sequence order
    pub passed: Vec<ObstacleVariant>,
}

/// Owns the live obstacle sequence and the spawn timer
#[derive(Debug, Clone)]
pub struct ObstacleField {
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub spawn_timer_ms: f64,
    pub spawn_interval_ms: f64,
    /// Obstacles fully passed, per variant
    pub passed: PassCounts,
    params: FieldParams,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(params: FieldParams, initial_interval_ms: f64) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer_ms: 0.0,
            spawn_interval_ms: initial_interval_ms,
            passed: PassCounts::new(),
            params,
            next_id: 1,
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Required distance between the last obstacle and the spawn point
    pub fn minimum_spacing(&self, speed: f32) -> f32 {
        self.params.spacing_base + self.params.spacing_speed_factor / speed.max(f32::EPSILON)
    }

    /// Distance from the most recently spawned obstacle to the spawn point
    pub fn gap_to_last(&self) -> Option<f32> {
        self.obstacles.last().map(|o| self.params.spawn_x - o.pos.x)
    }

    /// Allocate an id and append an obstacle of the given kind at the spawn point
    pub fn spawn(&mut self, kind: ObstacleKind) -> &Obstacle {
        let id = self.next_id;
        self.next_id += 1;
        let bottom = kind.spawn_bottom(self.params.ground_y);
        self.obstacles
            .push(Obstacle::new(id, kind, self.params.spawn_x, bottom));
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Advance the spawn timer, scroll everything, and retire what left the screen
    ///
    /// `bounds` is the current (min, max) spawn interval used to redraw the
    /// next interval after every expiry, whether or not the spawn succeeded.
    pub fn update<R: Rng>(
        &mut self,
        dt: f64,
        speed: f32,
        bounds: (f64, f64),
        rng: &mut R,
    ) -> FieldUpdate {
        let mut update = FieldUpdate::default();

        self.spawn_timer_ms += dt;
        if self.spawn_timer_ms > self.spawn_interval_ms {
            update.attempt = Some(self.try_spawn(speed, rng));
            self.spawn_timer_ms = 0.0;
            let (min, max) = bounds;
            self.spawn_interval_ms = min + rng.random::<f64>() * (max - min).max(0.0);
        }

        let FieldParams {
            flap_interval_ms,
            flap_frames,
            ..
        } = self.params;
        for obstacle in &mut self.obstacles {
            obstacle.advance(dt, speed, flap_interval_ms, flap_frames);
        }

        update.passed = self.prune();
        update
    }

    fn try_spawn<R: Rng>(&mut self, speed: f32, rng: &mut R) -> SpawnAttempt {
        let required = self.minimum_spacing(speed);
        let gap = self.gap_to_last();
        if let Some(gap) = gap {
            if gap <= required {
                log::debug!("Spawn blocked: gap {:.1} <= {:.1}", gap, required);
                return SpawnAttempt::Blocked { gap, required };
            }
        }

        let kind = random_kind(rng);
        let obstacle = self.spawn(kind);
        log::debug!(
            "Spawned {} #{} at speed {:.1}",
            obstacle.variant().as_str(),
            obstacle.id,
            speed
        );
        SpawnAttempt::Spawned {
            id: obstacle.id,
            variant: obstacle.variant(),
            gap,
        }
    }

    /// Remove obstacles whose right edge passed x = 0, counting each once
    fn prune(&mut self) -> Vec<ObstacleVariant> {
        let mut passed = Vec::new();
        let counts = &mut self.passed;
        self.obstacles.retain(|o| {
            if o.is_off_screen() {
                counts.record(o.variant());
                passed.push(o.variant());
                false
            } else {
                true
            }
        });
        if !passed.is_empty() {
            log::debug!("Retired {} obstacle(s), {} live", passed.len(), self.obstacles.len());
        }
        passed
    }
}

/// Coin-flip between a cactus and a bird, then pick its variant uniformly
pub fn random_kind<R: Rng>(rng: &mut R) -> ObstacleKind {
    if rng.random_bool(0.5) {
        let idx = rng.random_range(0..GroundVariant::ALL.len());
        ObstacleKind::Ground(GroundVariant::ALL[idx])
    } else {
        let idx = rng.random_range(0..AerialVariant::ALL.len());
        ObstacleKind::aerial(AerialVariant::ALL[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> ObstacleField {
        ObstacleField::new(FieldParams::default(), INITIAL_SPAWN_INTERVAL_MS)
    }

    #[test]
    fn test_variant_names_round_trip() {
        for v in ObstacleVariant::ALL {
            assert_eq!(ObstacleVariant::from_name(v.as_str()), Some(v));
        }
        assert_eq!(ObstacleVariant::from_name("pterodactyl"), None);
        assert!(ObstacleVariant::BirdMid.is_aerial());
        assert!(!ObstacleVariant::CactusWide.is_aerial());
    }

    #[test]
    fn test_serde_uses_report_names() {
        let json = serde_json::to_string(&ObstacleVariant::CactusTallWide).unwrap();
        assert_eq!(json, "\"cactus_tall_wide\"");
    }

    #[test]
    fn test_spawn_geometry() {
        let mut f = field();
        let cactus = *f.spawn(ObstacleKind::Ground(GroundVariant::Wide));
        assert_eq!(cactus.pos, Vec2::new(WORLD_WIDTH, GROUND_Y));
        assert_eq!(cactus.size, Vec2::new(105.0, 71.0));

        let bird = *f.spawn(ObstacleKind::aerial(AerialVariant::High));
        assert_eq!(bird.pos.y, GROUND_Y - 80.0);
        assert_eq!(bird.size, Vec2::new(AERIAL_WIDTH, AERIAL_HEIGHT));
        assert!(bird.id > cactus.id);
    }

    #[test]
    fn test_no_spawn_before_interval() {
        let mut f = field();
        let mut rng = Pcg32::seed_from_u64(1);
        let update = f.update(1000.0, BASE_SPEED, (800.0, 2000.0), &mut rng);
        assert!(update.attempt.is_none());
        assert!(f.is_empty());
        assert_eq!(f.spawn_timer_ms, 1000.0);
    }

    #[test]
    fn test_first_spawn_on_empty_field() {
        let mut f = field();
        let mut rng = Pcg32::seed_from_u64(2);
        let update = f.update(1501.0, BASE_SPEED, (800.0, 2000.0), &mut rng);
        assert!(matches!(
            update.attempt,
            Some(SpawnAttempt::Spawned { gap: None, .. })
        ));
        assert_eq!(f.len(), 1);
        assert_eq!(f.spawn_timer_ms, 0.0);
        assert!((800.0..=2000.0).contains(&f.spawn_interval_ms));
        // Scrolled once after spawning
        assert_eq!(f.obstacles[0].pos.x, WORLD_WIDTH - BASE_SPEED);
    }

    #[test]
    fn test_blocked_spawn_still_rerolls_timer() {
        let mut f = field();
        let mut rng = Pcg32::seed_from_u64(3);
        f.spawn(ObstacleKind::Ground(GroundVariant::Standard));
        f.spawn_timer_ms = f.spawn_interval_ms;

        let update = f.update(1.0, BASE_SPEED, (900.0, 900.0), &mut rng);
        match update.attempt {
            Some(SpawnAttempt::Blocked { gap, required }) => {
                assert_eq!(gap, 0.0);
                assert!((required - 60.0).abs() < 1e-4);
            }
            other => panic!("expected blocked spawn, got {:?}", other),
        }
        assert_eq!(f.len(), 1);
        assert_eq!(f.spawn_timer_ms, 0.0);
        assert_eq!(f.spawn_interval_ms, 900.0);
    }

    #[test]
    fn test_minimum_spacing_shrinks_with_speed() {
        let f = field();
        assert!((f.minimum_spacing(5.0) - 60.0).abs() < 1e-4);
        assert!((f.minimum_spacing(20.0) - 52.5).abs() < 1e-4);
        assert!(f.minimum_spacing(0.0).is_finite());
    }

    #[test]
    fn test_prune_counts_each_obstacle_once() {
        let mut f = field();
        let mut rng = Pcg32::seed_from_u64(4);
        f.spawn(ObstacleKind::Ground(GroundVariant::Standard));
        f.spawn(ObstacleKind::aerial(AerialVariant::Mid));
        f.obstacles[0].pos.x = -39.0;
        f.obstacles[1].pos.x = 300.0;

        // -39 - 5 + 40 = -4 < 0: retired
        let update = f.update(16.0, BASE_SPEED, (800.0, 2000.0), &mut rng);
        assert_eq!(update.passed, vec![ObstacleVariant::CactusStandard]);
        assert_eq!(f.len(), 1);
        assert_eq!(f.passed.get(ObstacleVariant::CactusStandard), 1);

        let update = f.update(16.0, BASE_SPEED, (800.0, 2000.0), &mut rng);
        assert!(update.passed.is_empty());
        assert_eq!(f.passed.get(ObstacleVariant::CactusStandard), 1);
        assert_eq!(f.passed.total(), 1);
    }

    #[test]
    fn test_x_never_increases() {
        let mut f = field();
        let mut rng = Pcg32::seed_from_u64(5);
        f.spawn(ObstacleKind::aerial(AerialVariant::Low));
        let mut last_x = f.obstacles[0].pos.x;
        for _ in 0..50 {
            f.update(16.0, 7.5, (5000.0, 5000.0), &mut rng);
            let x = f.obstacles[0].pos.x;
            assert!(x <= last_x);
            last_x = x;
        }
    }

    #[test]
    fn test_bird_flaps_every_interval() {
        let mut f = field();
        let mut rng = Pcg32::seed_from_u64(6);
        f.spawn(ObstacleKind::aerial(AerialVariant::Low));
        f.spawn_interval_ms = 1e9;
        f.update(150.0, 1.0, (800.0, 2000.0), &mut rng);
        assert_eq!(f.obstacles[0].frame(), 0);
        f.update(60.0, 1.0, (800.0, 2000.0), &mut rng);
        assert_eq!(f.obstacles[0].frame(), 1);
        f.update(201.0, 1.0, (800.0, 2000.0), &mut rng);
        assert_eq!(f.obstacles[0].frame(), 0);
    }

    #[test]
    fn test_random_kind_covers_all_variants() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            seen.insert(random_kind(&mut rng).variant());
        }
        assert_eq!(seen.len(), ObstacleVariant::ALL.len());
    }

    #[test]
    fn test_successful_spawns_respect_spacing() {
        let mut f = field();
        let mut rng = Pcg32::seed_from_u64(8);
        // Short intervals at top speed force frequent spacing checks
        for _ in 0..5000 {
            let update = f.update(16.0, MAX_SPEED, (20.0, 40.0), &mut rng);
            if let Some(SpawnAttempt::Spawned { gap: Some(gap), .. }) = update.attempt {
                assert!(gap > f.minimum_spacing(MAX_SPEED));
            }
        }
        assert!(f.passed.total() > 0);
    }
}
