//! Noise constants and runtime configuration defaults

/// First line of every chain code dataset file
pub const DATASET_HEADER: &str = "CC Multi";

/// Extension of dataset files picked up from a target directory
pub const DATASET_EXTENSION: &str = "txt";

/// Chain code families that exist in datasets but have no tables here
pub const UNSUPPORTED_ALPHABET_TOKENS: [&str; 3] = ["VCC", "3OT", "AF8"];

// Checked neighborhood is (2r+1)x(2r+1) around every rewritten pixel
/// Radius of the self-touch neighborhood check
pub const NEIGHBORHOOD_RADIUS: i32 = 1;

/// Largest absolute coordinate a chain code walk may reach when it is built
///
/// Leaves headroom for noise growth and frame translation within `i32`.
pub const COORDINATE_LIMIT: i32 = 1 << 28;

// Default values for configurable parameters
/// Fixed seed for reproducible noise
pub const DEFAULT_SEED: u64 = 42;

/// Default per-position mutation probability
pub const DEFAULT_NOISE_PROBABILITY: f64 = 0.02;

/// Default number of noise passes over the batch
pub const DEFAULT_ITERATIONS: usize = 1;

// Raster output settings
/// Size in image pixels of one boundary pixel
pub const RENDER_SCALE: u32 = 2;
/// Empty border around the frame, in boundary pixels
pub const RENDER_PADDING: u32 = 1;

/// Longest frame side, in boundary pixels, that is rasterized
pub const MAX_FRAME_SIDE: u32 = 4096;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_noisy";
/// Suffix of the CSV analysis report
pub const REPORT_SUFFIX: &str = "_analysis";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 200;
/// How much longer the last GIF frame stays on screen
pub const FINAL_FRAME_HOLD_FACTOR: u32 = 5;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
