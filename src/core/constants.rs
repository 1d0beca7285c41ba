// Exploration timing
pub const EXPLORATION_TICK_HZ: u32 = 60;
pub const MAX_CATCH_UP_TICKS: u32 = 10;

// Map geometry
pub const MAP_WIDTH: f64 = 800.0;
pub const MAP_HEIGHT: f64 = 600.0;
pub const TILE_SIZE: f64 = 40.0;
pub const FLOOR_START_X: f64 = 50.0;
pub const FLOOR_START_Y: f64 = 50.0;

// Movement (units per tick)
pub const PLAYER_SPEED: f64 = 2.5;
pub const ENEMY_SPEED: f64 = 1.5;

// Engagement radii, in tiles
pub const AWARENESS_RADIUS_TILES: f64 = 3.0;
pub const COLLISION_RADIUS_TILES: f64 = 0.8;
pub const ENGAGE_RADIUS_TILES: f64 = 1.5;

// Battle pacing (milliseconds)
pub const PLAYER_WINDUP_MS: u64 = 400;
pub const OPPONENT_TURN_DELAY_MS: u64 = 1000;
pub const OPPONENT_WINDUP_MS: u64 = 400;
pub const PLAYER_HIT_RECOVERY_MS: u64 = 400;
pub const OPPONENT_GAP_MS: u64 = 500;
pub const EFFECT_DURATION_MS: u64 = 1000;
pub const BATTLE_SETTLE_MS: u64 = 3000;

// Skill formulas
pub const BASE_SKILL_DAMAGE: u32 = 8;
pub const BASE_AOE_DAMAGE: u32 = 5;
pub const DEFAULT_DAMAGE_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_AOE_MULTIPLIER: f64 = 0.7;
pub const DEFAULT_HEAL_AMOUNT: u32 = 20;

// Opponent attacks: damage = max(1, roll - vit / DEFENSE_DIVISOR)
pub const OPPONENT_DAMAGE_MIN: u32 = 6;
pub const OPPONENT_DAMAGE_MAX: u32 = 10;
pub const DEFENSE_DIVISOR: u32 = 2;
pub const MINION_HEALTH: u32 = 40;
pub const BOSS_HEALTH: u32 = 120;

// Health
pub const HEALTH_PER_VITALITY: u32 = 10;
pub const DEFEAT_HEALTH_DIVISOR: u32 = 10;

// XP and leveling
pub const STARTING_XP_TO_NEXT_LEVEL: u64 = 100;
pub const XP_THRESHOLD_GROWTH: f64 = 1.5;
pub const LEVEL_UP_STAT_POINTS: u32 = 3;
pub const LEVEL_UP_SKILL_POINTS: u32 = 1;

// Stamina
pub const MAX_STAMINA: u32 = 50;
pub const STAMINA_REGEN_INTERVAL_SECS: u64 = 5 * 60;
pub const STAMINA_POLL_INTERVAL_SECS: u64 = 60;

// Dungeon floors
pub const MAX_FLOORS: u32 = 10;
pub const FLOOR_BASE_COST: u32 = 5;
pub const FLOOR_COST_PER_LEVEL: u32 = 2;

// Interactive objects
pub const CHEST_GOLD_MIN: u64 = 10;
pub const CHEST_GOLD_MAX: u64 = 50;
pub const SHRINE_DAMAGE_MULTIPLIER: f64 = 1.5;
