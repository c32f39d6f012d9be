#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::suboptimal_flops)]

//! Property tests for oscillator motion and parameter validation.

use oscillator::{Oscillator, Parameter, Params, fps};
use proptest::prelude::*;

/// Runs `frames` frames of ten sub-steps and returns the displacement at the
/// end of each frame.
fn trace(params: Params, frames: usize) -> Vec<f64> {
    let mut osc = Oscillator::new(params);
    (0..frames)
        .map(|_| {
            for _ in 0..10 {
                osc.integrate(fps(600));
            }
            osc.motion().y
        })
        .collect()
}

fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0, |acc: f64, y| acc.max(y.abs()))
}

// =============================================================================
// Decay properties
// =============================================================================

proptest! {
    #[test]
    fn displacement_never_exceeds_release(
        mass in 1.0f64..10.0,
        spring in 1.0f64..20.0,
        damping in 1.0f64..10.0,
    ) {
        let params = Params::new(mass, spring, damping, 1.0).unwrap();
        let samples = trace(params, 1200);

        // Released from y = 1.0 with no velocity
        prop_assert!(
            peak(&samples) <= 1.0,
            "grew past release: peak={}, m={}, k={}, B={}",
            peak(&samples), mass, spring, damping
        );
    }

    #[test]
    fn oscillation_decays(
        mass in 1.0f64..10.0,
        spring in 1.0f64..20.0,
        damping in 1.0f64..10.0,
    ) {
        let params = Params::new(mass, spring, damping, 1.0).unwrap();
        let samples = trace(params, 1200);
        let (early, late) = samples.split_at(600);

        prop_assert!(
            peak(late) < peak(early),
            "no decay: early={}, late={}, m={}, k={}, B={}",
            peak(early), peak(late), mass, spring, damping
        );
    }

    #[test]
    fn motion_stays_finite(
        mass in 0.1f64..100.0,
        spring in 0.1f64..100.0,
        damping in 0.5f64..100.0,
    ) {
        let params = Params::new(mass, spring, damping, 1.0).unwrap();
        let mut osc = Oscillator::new(params);
        for _ in 0..6000 {
            osc.integrate(fps(600));
            let motion = osc.motion();
            prop_assert!(motion.y.is_finite());
            prop_assert!(motion.yp.is_finite());
            prop_assert!(motion.ypp.is_finite());
        }
    }
}

// =============================================================================
// Parameter validation properties
// =============================================================================

proptest! {
    #[test]
    fn non_positive_values_rejected(value in -1e9f64..=0.0) {
        let mut params = Params::default();
        for parameter in Parameter::ALL {
            prop_assert!(params.set(parameter, value).is_err());
        }
        prop_assert_eq!(params, Params::default());
    }

    #[test]
    fn positive_values_stored_exactly(value in 1e-9f64..1e9) {
        let mut params = Params::default();
        for parameter in Parameter::ALL {
            prop_assert!(params.set(parameter, value).is_ok());
            prop_assert_eq!(params.get(parameter), value);
        }
    }
}
