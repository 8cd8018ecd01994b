// Configuration file, world units are abstract meters (1 unit = 1 meter)
// This controls the initial generation parameter settings

// Map extent (meters), the grid spans [-MAP_EXTENT, MAP_EXTENT] on both axes
pub const MAP_EXTENT: f32 = 100.0;

pub const INITIAL_SEED: u64 = 7064738151912733005;

// Grid resolution
pub const NUM_X_CELLS: i32 = 20;
pub const NUM_Y_CELLS: i32 = 20;

// Decorative connector ring around each grid anchor
pub const NUM_CONNECTORS: usize = 8; // must stay even
pub const CONNECTOR_RADIUS: f32 = 1.0;

// Walk curvature band, cosine of the turn angle between consecutive segments
// 0.1 allows turns up to roughly 84 degrees; reversals are always rejected
pub const MIN_COS_TURN: f32 = 0.1;
pub const COS_TURN_EPS: f32 = 1e-3; // slack for floating-point roundoff

// Paths with fewer recorded transitions than this are pruned after generation
pub const MIN_PATH_LENGTH: usize = 15;

// Spline sampling, points per path segment
pub const SPLINE_SUBDIVISIONS: usize = 8;

// Road rendering
pub const ROAD_SPHERE_RADIUS: f32 = 0.45;
pub const ROAD_LAYER_HEIGHT: f32 = 0.25; // spheres sit slightly above the floor
pub const FLOOR_HEIGHT: f32 = -0.1;
