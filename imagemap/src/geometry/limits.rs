// Caps on untrusted map markup

pub const MAX_COORDS_PER_REGION: usize = 4_096;
pub const MAX_REGIONS_PER_MAP: usize = 10_000;

// Debounce quiet period for resize bursts (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 250;
pub const MAX_DEBOUNCE_MS: u32 = 60_000;

pub const DEFAULT_SELECTOR: &str = "map";
