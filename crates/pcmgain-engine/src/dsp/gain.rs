use super::effect::Effect;

/// Scale every sample by `gain`, truncating toward zero and clamping to the
/// i16 range. The product is taken in f32 and narrowed through an i32.
#[inline]
pub fn apply_gain(samples: &mut [i16], gain: f32) {
    for s in samples.iter_mut() {
        let x = (*s as f32 * gain) as i32;
        *s = if x > i16::MAX as i32 {
            i16::MAX
        } else if x < i16::MIN as i32 {
            i16::MIN
        } else {
            x as i16
        };
    }
}

/// Same as [`apply_gain`] but leaves `samples` untouched and returns the result.
pub fn apply_gain_copied(samples: &[i16], gain: f32) -> Vec<i16> {
    let mut out = samples.to_vec();
    apply_gain(&mut out, gain);
    out
}

#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// Linear gain on 16-bit PCM with optional dB control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gain {
    lin: f32,
}

impl Gain {
    pub fn new(lin: f32) -> Self {
        Self { lin }
    }

    pub fn from_db(db: f32) -> Self {
        Self::new(db_to_linear(db))
    }

    pub fn linear(&self) -> f32 {
        self.lin
    }
}

impl Default for Gain {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Effect for Gain {
    fn set_param(&mut self, key: &str, value: f32) {
        match key {
            "db" => self.lin = db_to_linear(value),
            "gain" => self.lin = value,
            _ => {}
        }
    }

    fn process(&mut self, block: &mut [i16]) {
        apply_gain(block, self.lin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_doubling_clamps() {
        let mut buf = [1000, -1000, 32000, -32000];
        apply_gain(&mut buf, 2.0);
        assert_eq!(buf, [2000, -2000, 32767, -32768]);
    }

    #[test]
    fn test_scenario_halving() {
        let mut buf = [100];
        apply_gain(&mut buf, 0.5);
        assert_eq!(buf, [50]);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let mut buf = [3, -3, 5, -5, 1, -1];
        apply_gain(&mut buf, 0.5);
        assert_eq!(buf, [1, -1, 2, -2, 0, 0]);

        let mut buf = [10, -10];
        apply_gain(&mut buf, 0.99);
        assert_eq!(buf, [9, -9]);
    }

    #[test]
    fn test_unity_gain_is_identity() {
        let orig: Vec<i16> = (i16::MIN..=i16::MAX).collect();
        let mut buf = orig.clone();
        apply_gain(&mut buf, 1.0);
        assert_eq!(buf, orig);
    }

    #[test]
    fn test_zero_gain_silences() {
        let mut buf: Vec<i16> = (i16::MIN..=i16::MAX).collect();
        apply_gain(&mut buf, 0.0);
        assert!(buf.iter().all(|&s| s == 0));

        let mut buf = [i16::MIN, -1, 1, i16::MAX];
        apply_gain(&mut buf, -0.0);
        assert_eq!(buf, [0, 0, 0, 0]);
    }

    #[test]
    fn test_power_of_two_gains_match_integer_math() {
        for s in i16::MIN..=i16::MAX {
            let mut buf = [s];
            apply_gain(&mut buf, 0.5);
            assert_eq!(buf[0], s / 2, "0.5 * {s}");

            let mut buf = [s];
            apply_gain(&mut buf, 0.25);
            assert_eq!(buf[0], s / 4, "0.25 * {s}");

            let mut buf = [s];
            apply_gain(&mut buf, 2.0);
            let want = (s as i32 * 2).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
            assert_eq!(buf[0], want, "2.0 * {s}");
        }
    }

    #[test]
    fn test_negative_gain_clamps_min_inversion() {
        let mut buf = [i16::MIN, i16::MAX, 100];
        apply_gain(&mut buf, -1.0);
        assert_eq!(buf, [i16::MAX, -i16::MAX, -100]);
    }

    #[test]
    fn test_huge_gain_saturates() {
        let mut buf = [1, -1, 0];
        apply_gain(&mut buf, 1.0e30);
        assert_eq!(buf, [i16::MAX, i16::MIN, 0]);
    }

    #[test]
    fn test_non_finite_gain() {
        let mut buf = [100, -100, 0];
        apply_gain(&mut buf, f32::NAN);
        assert_eq!(buf, [0, 0, 0]);

        let mut buf = [100, -100, 0];
        apply_gain(&mut buf, f32::INFINITY);
        assert_eq!(buf, [i16::MAX, i16::MIN, 0]);

        let mut buf = [100, -100, 0];
        apply_gain(&mut buf, f32::NEG_INFINITY);
        assert_eq!(buf, [i16::MIN, i16::MAX, 0]);
    }

    #[test]
    fn test_product_rounds_in_f32() {
        // 3 * 3.6666665 is just under 11 but rounds up to 11.0 in f32.
        let mut buf = [3];
        apply_gain(&mut buf, f32::from_bits(0x406a_aaaa));
        assert_eq!(buf, [11]);
    }

    #[test]
    fn test_empty_slice_is_noop() {
        let mut buf: [i16; 0] = [];
        apply_gain(&mut buf, 2.0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_copied_leaves_input() {
        let input = vec![1000i16, -20000, 20000];
        let out = apply_gain_copied(&input, 2.0);
        assert_eq!(input, vec![1000, -20000, 20000]);
        assert_eq!(out, vec![2000, -32768, 32767]);
    }

    #[test]
    fn test_gain_from_db() {
        assert_eq!(Gain::from_db(0.0).linear(), 1.0);
        assert!((Gain::from_db(20.0).linear() - 10.0).abs() < 1e-4);
        assert!((Gain::from_db(-6.0206).linear() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_effect_params() {
        let mut g = Gain::default();
        g.set_param("gain", 2.0);
        let mut buf = [1000, 20000];
        g.process(&mut buf);
        assert_eq!(buf, [2000, 32767]);

        g.set_param("db", 0.0);
        assert_eq!(g.linear(), 1.0);

        g.set_param("unknown", 9.0);
        assert_eq!(g.linear(), 1.0);
    }
}
