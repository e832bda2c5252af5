use descent_rs::{
    Example, GradientDescent, StochasticConfig, StochasticGradientDescent,
};
use descent_rs::step::Adam;
use ndarray::{arr1, Array1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    env_logger::init();

    // Generate a linearly separable problem: points in the unit square,
    // labelled by the sign of a fixed true weight vector
    let truth: Array1<f64> = arr1(&[3.0, -2.0]);
    let mut rng = StdRng::seed_from_u64(1);
    let sample = |rng: &mut StdRng| {
        let x = arr1(&[rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)]);
        let label = truth.dot(&x).signum();
        Example::new(x, label)
    };
    let train: Vec<_> = (0..500).map(|_| sample(&mut rng)).collect();
    let test: Vec<_> = (0..200).map(|_| sample(&mut rng)).collect();

    // Stochastic descent with an Adam step and validation-based early
    // stopping
    let config = StochasticConfig {
        learning_rate: Some(0.01),
        iterations_multiplier: Some(50),
        ..StochasticConfig::default()
    };
    let mut descent =
        StochasticGradientDescent::new(train, Adam::new(), &config, StdRng::seed_from_u64(2))
            .unwrap();
    let weights = descent.optimize().unwrap();

    dbg!(&weights);
    dbg!(descent.iterations());

    let correct = test
        .iter()
        .filter(|e| weights.dot(&e.features) * e.target > 0.0)
        .count();
    println!("held-out accuracy: {}%", 100.0 * correct as f64 / test.len() as f64);
}
