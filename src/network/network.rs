use crate::activation::activation::Activation;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::record::NetworkRecord;

/// A fully-connected network with a single hidden layer, trained by
/// backpropagation with plain gradient descent on one example at a time.
///
/// Layer sizes and the activation are fixed at construction; the four
/// parameter matrices (`weights_ih`, `weights_ho`, `bias_h`, `bias_o`) are the
/// only state that training mutates. Inputs and targets cross the boundary as
/// plain `&[f64]` slices, column matrices stay internal.
#[derive(Debug)]
pub struct NeuralNetwork {
    input_nodes: usize,
    hidden_nodes: usize,
    output_nodes: usize,
    weights_ih: Matrix,
    weights_ho: Matrix,
    bias_h: Matrix,
    bias_o: Matrix,
    /// Step size applied to every gradient. Positive; defaults to 0.1.
    pub learning_rate: f64,
    activation: Activation,
}

impl NeuralNetwork {
    /// Creates a network with the given layer sizes, every weight and bias
    /// drawn uniformly from `[-1, 1)`.
    ///
    /// Fails with `InvalidDimension` when any node count is zero.
    pub fn new(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        activation: Activation,
    ) -> Result<NeuralNetwork> {
        let mut weights_ih = Matrix::zeros(hidden_nodes, input_nodes)?;
        let mut weights_ho = Matrix::zeros(output_nodes, hidden_nodes)?;
        let mut bias_h = Matrix::zeros(hidden_nodes, 1)?;
        let mut bias_o = Matrix::zeros(output_nodes, 1)?;
        weights_ih.randomize_uniform(-1.0, 1.0);
        weights_ho.randomize_uniform(-1.0, 1.0);
        bias_h.randomize_uniform(-1.0, 1.0);
        bias_o.randomize_uniform(-1.0, 1.0);

        Ok(NeuralNetwork {
            input_nodes,
            hidden_nodes,
            output_nodes,
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
            learning_rate: 0.1,
            activation,
        })
    }

    pub fn input_nodes(&self) -> usize {
        self.input_nodes
    }

    pub fn hidden_nodes(&self) -> usize {
        self.hidden_nodes
    }

    pub fn output_nodes(&self) -> usize {
        self.output_nodes
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Forward pass: returns the activated output layer for one input.
    ///
    /// Inference never touches the stored parameters, so running the same
    /// input twice yields the same output.
    pub fn run(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_nodes {
            return Err(Error::DimensionMismatch {
                op: "run input",
                expected: (self.input_nodes, 1),
                got: (input.len(), 1),
            });
        }
        let x = Matrix::from_array(input);

        let mut hidden = self.weights_ih.matmul(&x)?;
        hidden.add(&self.bias_h)?;
        hidden.map(|z| self.activation.function(z));

        let mut output = self.weights_ho.matmul(&hidden)?;
        output.add(&self.bias_o)?;
        output.map(|z| self.activation.function(z));

        Ok(output.to_array())
    }

    /// One stochastic gradient-descent step on a single example, updating all
    /// four parameter matrices in place.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        if input.len() != self.input_nodes {
            return Err(Error::DimensionMismatch {
                op: "train input",
                expected: (self.input_nodes, 1),
                got: (input.len(), 1),
            });
        }
        if target.len() != self.output_nodes {
            return Err(Error::DimensionMismatch {
                op: "train target",
                expected: (self.output_nodes, 1),
                got: (target.len(), 1),
            });
        }

        // Forward pass, retaining the pre-activation sums z = Wx + b so the
        // derivative is evaluated as f'(z), not at the activated value.
        let x = Matrix::from_array(input);
        let mut pre_hidden = self.weights_ih.matmul(&x)?;
        pre_hidden.add(&self.bias_h)?;
        let mut hidden = pre_hidden.clone();
        hidden.map(|z| self.activation.function(z));

        let mut pre_output = self.weights_ho.matmul(&hidden)?;
        pre_output.add(&self.bias_o)?;
        let mut output = pre_output.clone();
        output.map(|z| self.activation.function(z));

        // Output error E = target - output; the hidden error is E pushed back
        // through the output weights.
        let output_error = Matrix::from_array(target).sub(&output)?;
        let hidden_error = self.weights_ho.transpose().matmul(&output_error)?;

        // Per layer: δ = lr * (E ⊙ f'(z)).
        let mut output_gradient = pre_output;
        output_gradient.map(|z| self.activation.derivative(z));
        output_gradient.hadamard(&output_error)?;
        let output_gradient = output_gradient.scale(self.learning_rate);

        let mut hidden_gradient = pre_hidden;
        hidden_gradient.map(|z| self.activation.derivative(z));
        hidden_gradient.hadamard(&hidden_error)?;
        let hidden_gradient = hidden_gradient.scale(self.learning_rate);

        // Weight deltas are δ times the transposed activations feeding the layer.
        let weights_ho_delta = output_gradient.matmul(&hidden.transpose())?;
        let weights_ih_delta = hidden_gradient.matmul(&x.transpose())?;

        self.weights_ho.add(&weights_ho_delta)?;
        self.bias_o.add(&output_gradient)?;
        self.weights_ih.add(&weights_ih_delta)?;
        self.bias_h.add(&hidden_gradient)?;

        Ok(())
    }

    /// Copies the node counts and the four parameter matrices into a
    /// serializable record.
    ///
    /// The activation and learning rate are construction-time configuration
    /// and are not part of the record.
    pub fn export_weights(&self) -> NetworkRecord {
        NetworkRecord {
            input_nodes: self.input_nodes,
            hidden_nodes: self.hidden_nodes,
            output_nodes: self.output_nodes,
            weights_ih: self.weights_ih.clone(),
            weights_ho: self.weights_ho.clone(),
            bias_h: self.bias_h.clone(),
            bias_o: self.bias_o.clone(),
        }
    }

    /// Replaces the node counts and all four parameter matrices with the
    /// record's contents.
    ///
    /// The record is validated in full before anything is assigned, so a
    /// `MalformedRecord` error leaves the network exactly as it was. The
    /// activation and learning rate stay untouched.
    pub fn import_weights(&mut self, record: NetworkRecord) -> Result<()> {
        record.validate()?;

        let NetworkRecord {
            input_nodes,
            hidden_nodes,
            output_nodes,
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
        } = record;
        self.input_nodes = input_nodes;
        self.hidden_nodes = hidden_nodes;
        self.output_nodes = output_nodes;
        self.weights_ih = weights_ih;
        self.weights_ho = weights_ho;
        self.bias_h = bias_h;
        self.bias_o = bias_o;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_node_counts() {
        assert!(matches!(
            NeuralNetwork::new(0, 3, 1, Activation::Sigmoid),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            NeuralNetwork::new(3, 0, 1, Activation::Sigmoid),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            NeuralNetwork::new(3, 3, 0, Activation::Sigmoid),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn parameters_match_declared_shapes() {
        let network = NeuralNetwork::new(3, 4, 2, Activation::ReLU).unwrap();
        assert_eq!((network.weights_ih.rows, network.weights_ih.cols), (4, 3));
        assert_eq!((network.weights_ho.rows, network.weights_ho.cols), (2, 4));
        assert_eq!((network.bias_h.rows, network.bias_h.cols), (4, 1));
        assert_eq!((network.bias_o.rows, network.bias_o.cols), (2, 1));
        assert_eq!(network.learning_rate, 0.1);
    }

    #[test]
    fn initial_parameters_are_uniform_in_range() {
        let network = NeuralNetwork::new(6, 8, 4, Activation::Sigmoid).unwrap();
        for matrix in [
            &network.weights_ih,
            &network.weights_ho,
            &network.bias_h,
            &network.bias_o,
        ] {
            assert!(matrix
                .data
                .iter()
                .flatten()
                .all(|&v| (-1.0..1.0).contains(&v)));
        }
        // Two fresh networks agreeing on every weight would mean the
        // initializer is not randomizing at all.
        let other = NeuralNetwork::new(6, 8, 4, Activation::Sigmoid).unwrap();
        assert_ne!(network.weights_ih, other.weights_ih);
    }
}
