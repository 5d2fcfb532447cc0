use std::process::exit;

use rand::thread_rng;
use toynet::{mean_squared_error, train_sampled, Activation, NeuralNetwork};

// Six rows of a three-input truth table. The label is the XOR of the first
// two inputs; the third input carries no signal.
fn dataset() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![0.0, 0.0, 1.0],
        vec![0.0, 1.0, 1.0],
        vec![1.0, 0.0, 1.0],
        vec![0.0, 1.0, 0.0],
        vec![1.0, 1.0, 1.0],
        vec![0.0, 0.0, 0.0],
    ];
    let targets = vec![
        vec![0.0],
        vec![1.0],
        vec![1.0],
        vec![1.0],
        vec![0.0],
        vec![0.0],
    ];
    (inputs, targets)
}

fn main() {
    let activation = match std::env::args().nth(1) {
        Some(name) => match name.parse::<Activation>() {
            Ok(activation) => activation,
            Err(e) => {
                eprintln!("{e}");
                exit(1);
            }
        },
        None => Activation::Sigmoid,
    };

    let (inputs, targets) = dataset();
    let mut network = NeuralNetwork::new(3, 3, 1, activation).unwrap();
    let mut rng = thread_rng();

    train_sampled(&mut network, &inputs, &targets, 100_000, &mut rng).unwrap();

    let mse = mean_squared_error(&network, &inputs, &targets).unwrap();
    println!("Mse after 100000 steps: {mse:.6}");
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.run(input).unwrap();
        println!(
            "Input: {:?} -> Output: {:.4} (want {})",
            input, output[0], target[0]
        );
    }

    // An input the network never saw during training.
    let unseen = [1.0, 0.0, 0.0];
    println!(
        "Unseen: {:?} -> Output: {:.4}",
        unseen,
        network.run(&unseen).unwrap()[0]
    );
}
