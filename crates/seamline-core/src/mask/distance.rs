use ndarray::Array2;

/// Exact squared Euclidean distance transform (Felzenszwalb-Huttenlocher).
///
/// Returns, per pixel, the squared distance on the pixel grid to the
/// nearest `true` pixel in `features`, or infinity when the feature set
/// is empty. Two separable 1D lower-envelope passes, columns then rows.
pub fn squared_distance(features: &Array2<bool>) -> Array2<f64> {
    let (h, w) = features.dim();
    let mut dist = Array2::from_elem((h, w), f64::INFINITY);
    for ((y, x), &f) in features.indexed_iter() {
        if f {
            dist[[y, x]] = 0.0;
        }
    }

    let mut scratch = vec![0.0f64; h.max(w)];

    for x in 0..w {
        for y in 0..h {
            scratch[y] = dist[[y, x]];
        }
        let t = envelope_1d(&scratch[..h]);
        for y in 0..h {
            dist[[y, x]] = t[y];
        }
    }

    for y in 0..h {
        for x in 0..w {
            scratch[x] = dist[[y, x]];
        }
        let t = envelope_1d(&scratch[..w]);
        for x in 0..w {
            dist[[y, x]] = t[x];
        }
    }

    dist
}

/// 1D pass: lower envelope of the parabolas `f[p] + (q - p)^2`.
///
/// Sites with infinite height hold no parabola; an all-infinite input
/// yields an all-infinite output.
fn envelope_1d(f: &[f64]) -> Vec<f64> {
    let n = f.len();
    let mut sites = vec![0usize; n];
    let mut bounds = vec![0.0f64; n + 1];
    let mut k: isize = -1;

    for q in 0..n {
        if f[q].is_infinite() {
            continue;
        }
        let mut s = 0.0;
        while k >= 0 {
            let p = sites[k as usize];
            s = (f[q] + (q * q) as f64 - f[p] - (p * p) as f64) / (2.0 * (q as f64 - p as f64));
            if s <= bounds[k as usize] {
                k -= 1;
            } else {
                break;
            }
        }
        if k < 0 {
            k = 0;
            sites[0] = q;
            bounds[0] = f64::NEG_INFINITY;
        } else {
            k += 1;
            sites[k as usize] = q;
            bounds[k as usize] = s;
        }
        bounds[k as usize + 1] = f64::INFINITY;
    }

    if k < 0 {
        return vec![f64::INFINITY; n];
    }

    let mut d = vec![0.0f64; n];
    let mut j = 0usize;
    for q in 0..n {
        while bounds[j + 1] < q as f64 {
            j += 1;
        }
        let p = sites[j];
        let dx = q as f64 - p as f64;
        d[q] = dx * dx + f[p];
    }

    d
}
