use rand::Rng;

use crate::error::Result;
use crate::network::network::NeuralNetwork;

/// Runs `steps` single-example training updates, each on an example drawn
/// uniformly at random from `inputs`/`targets`.
///
/// The caller supplies the random source, so repeated runs can be seeded.
///
/// # Panics
/// Panics if `inputs` is empty or `inputs` and `targets` differ in length.
pub fn train_sampled<R: Rng>(
    network: &mut NeuralNetwork,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    steps: usize,
    rng: &mut R,
) -> Result<()> {
    assert!(!inputs.is_empty(), "training set must not be empty");
    assert_eq!(inputs.len(), targets.len(), "inputs and targets must pair up");

    for _ in 0..steps {
        let pick = rng.gen_range(0..inputs.len());
        network.train(&inputs[pick], &targets[pick])?;
    }

    Ok(())
}

/// Mean over the examples of the summed squared output error.
///
/// # Panics
/// Panics if `inputs` is empty or `inputs` and `targets` differ in length.
pub fn mean_squared_error(
    network: &NeuralNetwork,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    assert!(!inputs.is_empty(), "evaluation set must not be empty");
    assert_eq!(inputs.len(), targets.len(), "inputs and targets must pair up");

    let mut total = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.run(input)?;
        total += target
            .iter()
            .zip(output.iter())
            .map(|(t, o)| (t - o).powi(2))
            .sum::<f64>();
    }

    Ok(total / inputs.len() as f64)
}
