use std::f32::consts::PI;

/// Blackman window (alpha = 0.16) of `len` coefficients.
///
/// Uses the periodic form (`n / len`), so the first coefficient is zero and
/// the peak sits at `len / 2`.
pub fn blackman(len: usize) -> Vec<f32> {
    const ALPHA: f32 = 0.16;
    let a0 = 0.5 * (1.0 - ALPHA);
    let a1 = 0.5;
    let a2 = 0.5 * ALPHA;

    (0..len)
        .map(|n| {
            let x = n as f32 / len as f32;
            a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
        })
        .collect()
}
