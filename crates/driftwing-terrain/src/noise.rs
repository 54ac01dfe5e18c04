//! Deterministic scalar noise over continuous 2D coordinates.
//!
//! All sampling is a pure function of `(seed, coordinate)`: two fields built
//! from the same seed agree everywhere, on any thread, in any call order.

/// Seeded gradient noise field.
///
/// Construction shuffles a permutation table from the seed; after that the
/// field is immutable and safe to share by reference across threads.
#[derive(Clone)]
pub struct NoiseField {
    /// Permutation table, duplicated for wrap-free indexing.
    perm: [u8; 512],
    /// Seed the table was built from.
    seed: u64,
}

impl NoiseField {
    /// Gradient vectors for 2D noise.
    const GRAD2: [[f64; 2]; 8] = [
        [1.0, 0.0],
        [-1.0, 0.0],
        [0.0, 1.0],
        [0.0, -1.0],
        [0.707, 0.707],
        [-0.707, 0.707],
        [0.707, -0.707],
        [-0.707, -0.707],
    ];

    /// Creates a new noise field from the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut perm = [0u8; 512];
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);

        // Fisher-Yates shuffle with a simple LCG
        let mut rng_state = seed;
        for i in (1..256).rev() {
            rng_state = rng_state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1);
            let j = ((rng_state >> 32) as usize) % (i + 1);
            p.swap(i, j);
        }

        perm[..256].copy_from_slice(&p);
        perm[256..512].copy_from_slice(&p);

        Self { perm, seed }
    }

    /// Returns the seed this field was built from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Samples the field at the given coordinates.
    ///
    /// Returns a continuous value in the range [-1, 1].
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let xi = xf as i64;
        let yi = yf as i64;
        let dx = x - xf;
        let dy = y - yf;

        let u = fade(dx);
        let v = fade(dy);

        let n00 = dot2(self.gradient(xi, yi), dx, dy);
        let n10 = dot2(self.gradient(xi + 1, yi), dx - 1.0, dy);
        let n01 = dot2(self.gradient(xi, yi + 1), dx, dy - 1.0);
        let n11 = dot2(self.gradient(xi + 1, yi + 1), dx - 1.0, dy - 1.0);

        let nx0 = lerp(n00, n10, u);
        let nx1 = lerp(n01, n11, u);
        lerp(nx0, nx1, v)
    }

    /// Fractal summation of successive octaves.
    ///
    /// Each octave doubles the frequency and scales its amplitude by
    /// `persistence` relative to the previous one. The total is divided by
    /// the sum of amplitudes actually used, so the output stays in [-1, 1]
    /// for any octave count and persistence.
    #[must_use]
    pub fn octave_sample(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        total / max_value
    }

    /// Maps a [-1, 1] noise value into [0, 1].
    #[must_use]
    pub fn normalize(n: f64) -> f64 {
        ((n + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Hashes lattice coordinates to a gradient vector.
    fn gradient(&self, ix: i64, iy: i64) -> [f64; 2] {
        let xi = (ix & 255) as usize;
        let yi = (iy & 255) as usize;
        let hash = self.perm[self.perm[xi] as usize + yi];
        Self::GRAD2[(hash & 7) as usize]
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

/// Quintic smoothstep for gradient interpolation.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn dot2(g: [f64; 2], x: f64, y: f64) -> f64 {
    g[0] * x + g[1] * y
}
