//! Seedless 3D value noise over (x, y, t).
//!
//! Several vector fields perturb dot motion with a scalar noise signal.
//! The kernel is value noise: each integer lattice corner gets a
//! pseudo-random value from an integer hash, and the eight corners around
//! a sample point are blended with a quintic fade on every axis, making
//! the result C1-smooth in x, y, and t. There is no seed or table state;
//! identical inputs always produce identical output.

/// Normalization constant for the 31-bit hash output.
const HASH_NORM: f64 = 2_147_483_648.0; // 2^31

/// Hashes three integer lattice coordinates into [0, 1).
///
/// Mixes the coordinates with 32-bit wrapping shift/XOR/multiply steps and
/// masks to a non-negative 31-bit value before normalizing.
pub fn hash3(i: i64, j: i64, k: i64) -> f64 {
    let n = (i as i32)
        .wrapping_add((j as i32).wrapping_mul(57))
        .wrapping_add((k as i32).wrapping_mul(131));
    let n = (n << 13) ^ n;
    let m = n
        .wrapping_mul(
            n.wrapping_mul(n)
                .wrapping_mul(15_731)
                .wrapping_add(789_221),
        )
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    m as f64 / HASH_NORM
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
///
/// Zero first and second derivative at t=0 and t=1, so blended noise is
/// smooth across lattice cell boundaries.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Samples value noise at (x, y, t). Output lies in [0, 1).
///
/// Integer coordinates are obtained with `floor` (toward negative
/// infinity), so the lattice is seamless across zero.
pub fn noise3(x: f64, y: f64, t: f64) -> f64 {
    let xi = x.floor();
    let yi = y.floor();
    let ti = t.floor();

    let u = fade(x - xi);
    let v = fade(y - yi);
    let w = fade(t - ti);

    let (xi, yi, ti) = (xi as i64, yi as i64, ti as i64);

    let blend_y = |dx: i64| {
        let blend_t = |dy: i64| {
            lerp(
                hash3(xi + dx, yi + dy, ti),
                hash3(xi + dx, yi + dy, ti + 1),
                w,
            )
        };
        lerp(blend_t(0), blend_t(1), v)
    };

    lerp(blend_y(0), blend_y(1), u)
}
