use rand::thread_rng;
use toynet::{mean_squared_error, train_sampled, Activation, NeuralNetwork};

fn main() {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

    let mut network = NeuralNetwork::new(2, 4, 1, Activation::Sigmoid).unwrap();
    let mut rng = thread_rng();

    for round in 1..=10 {
        train_sampled(&mut network, &inputs, &targets, 5_000, &mut rng).unwrap();
        let mse = mean_squared_error(&network, &inputs, &targets).unwrap();
        println!("Step {}: mse = {mse:.6}", round * 5_000);
    }

    for input in &inputs {
        let output = network.run(input).unwrap();
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }
}
