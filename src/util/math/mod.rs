use std::f64::consts::TAU;

/// Fractional part of `v`, in `[0, 1)` for finite `v`
#[inline]
pub(crate) fn fract_floor(v: f64) -> f64 {
    v - v.floor()
}

/// Map `v` to `[0, τ]`
///
/// Rounding can land slightly outside: exactly `τ` for tiny negative `v`,
/// or slightly below `0` just under a multiple of `τ`. See [fold_tau].
#[inline]
pub(crate) fn mod2pi_pos(v: f64) -> f64 {
    v - TAU * (v / TAU).floor()
}

/// Fold a value that rounded just outside `[0, τ)` back inside
///
/// `v` must be within one period of `[0, τ)`.
#[inline]
pub(crate) fn fold_tau(v: f64) -> f64 {
    let v = if v < 0. { v + TAU } else { v };
    if v >= TAU {
        0.
    } else {
        v
    }
}

/// Step `v` by `steps` units in the last place. Positive `steps` move away
/// from zero.
///
/// `v` must be nonzero and finite.
#[inline]
pub(crate) fn ulp_step(v: f64, steps: i64) -> f64 {
    f64::from_bits(v.to_bits().wrapping_add_signed(steps))
}

#[cfg(test)]
mod test {
    use std::f64::consts::{PI, TAU};

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn fract_of_negative() {
        assert_approx_eq!(f64, fract_floor(-0.25), 0.75);
        assert_approx_eq!(f64, fract_floor(2.5), 0.5);
        assert_eq!(fract_floor(3.), 0.);
    }

    #[test]
    fn mod2pi_pos_basic() {
        assert_approx_eq!(f64, mod2pi_pos(3. * PI), PI, epsilon = 1e-12);
        assert_approx_eq!(f64, mod2pi_pos(-PI), PI, epsilon = 1e-12);
        assert_eq!(mod2pi_pos(0.), 0.);
        assert_eq!(mod2pi_pos(TAU), 0.);
    }

    #[test]
    fn mod2pi_pos_tiny_negative_hits_tau() {
        assert_eq!(mod2pi_pos(-1e-20), TAU);
        assert_eq!(fold_tau(mod2pi_pos(-1e-20)), 0.);
    }

    #[test]
    fn fold_tau_below_zero() {
        assert_eq!(fold_tau(-1e-20), 0.);
        let v = fold_tau(-1.4210854715202004e-14);
        assert!(v > 0. && v < TAU, "{v}");
        assert_approx_eq!(f64, v, TAU, epsilon = 1e-13);
        assert_eq!(fold_tau(1.), 1.);
    }

    #[test]
    fn mod2pi_pos_under_multiple() {
        // x / τ rounds up to 17, leaving a negative remainder
        let x = 106.81415022205296;
        assert!(mod2pi_pos(x) < 0.);
        let folded = fold_tau(mod2pi_pos(x));
        assert!(folded >= 0. && folded < TAU, "{folded}");
    }

    #[test]
    fn ulp_step_neighbours() {
        let x = 17. * TAU;
        assert!(ulp_step(x, 1) > x);
        assert!(ulp_step(x, -1) < x);
        assert_eq!(ulp_step(ulp_step(x, 2), -2), x);
        assert!(ulp_step(-x, 1) < -x);
    }
}
