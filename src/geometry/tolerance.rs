// Centralized tolerances for edit reconciliation

pub const EPS_LEN: f32 = 1e-6;              // zero-length chord threshold
pub const CURVE_OFFSET_RATIO: f32 = 0.18;   // default bend offset as a fraction of chord length
pub const CONTROL_SNAP_DIST: f32 = 2.0;     // explicit controls this close to the default are dropped

#[inline] pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }
