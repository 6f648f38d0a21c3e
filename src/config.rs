// Configuration file, all measurements in real-world meters (1 unit = 1 meter)
// This controls the default tree archetype handed to the generator

pub const INITIAL_SEED: u64 = 7064817306152523417;

// trunk parameters
pub const LOOP_COUNT: i32 = 6;        // recursion depth; buffers grow as 2^L, keep single digits
pub const SIDES: i32 = 8;             // polygon sides per ring cross-section
pub const TRUNK_HEIGHT: f32 = 2.0;    // first segment height
pub const TRUNK_WIDTH: f32 = 0.5;     // first ring radius

// main branch intervals (the continuing trunk draws from these)
pub const MAIN_HEIGHT_SCALE: (f32, f32) = (0.75, 0.95);
pub const MAIN_WIDTH_SCALE: (f32, f32) = (0.70, 0.90);
pub const MAIN_ROTATION: (f32, f32) = (0.0, 360.0);   // degrees around the up axis
pub const MAIN_BENDING: (f32, f32) = (-12.0, 12.0);   // degrees around the forward axis

// secondary branch intervals (spawned subtrees draw from these)
pub const SECONDARY_HEIGHT_SCALE: (f32, f32) = (0.45, 0.70);
pub const SECONDARY_WIDTH_SCALE: (f32, f32) = (0.40, 0.65);
pub const SECONDARY_ROTATION: (f32, f32) = (0.0, 360.0);
pub const SECONDARY_BENDING: (f32, f32) = (25.0, 60.0);

// startup grove parameters
pub const GROVE_TREE_COUNT: usize = 5;
pub const GROVE_RING_RADIUS: f32 = 14.0;  // mean distance from origin
pub const GROVE_JITTER_SIGMA: f32 = 3.0;  // normal jitter around the ring
