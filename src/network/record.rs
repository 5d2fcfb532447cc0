use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// A network's trained state: the three node counts plus the four parameter
/// matrices, each serialized as `{rows, cols, data}`.
///
/// The record deliberately carries no activation choice and no learning rate;
/// those are construction-time configuration, not trained state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    pub weights_ih: Matrix,
    pub weights_ho: Matrix,
    pub bias_h: Matrix,
    pub bias_o: Matrix,
}

impl NetworkRecord {
    /// Checks every embedded shape against every other.
    ///
    /// A deserialized record is untrusted: a matrix header may disagree with
    /// its own data, and the four shapes must agree with the node counts.
    pub fn validate(&self) -> Result<()> {
        if self.input_nodes == 0 || self.hidden_nodes == 0 || self.output_nodes == 0 {
            return Err(Error::MalformedRecord(format!(
                "node counts must be positive, got {}/{}/{}",
                self.input_nodes, self.hidden_nodes, self.output_nodes
            )));
        }

        let expected = [
            ("weights_ih", &self.weights_ih, self.hidden_nodes, self.input_nodes),
            ("weights_ho", &self.weights_ho, self.output_nodes, self.hidden_nodes),
            ("bias_h", &self.bias_h, self.hidden_nodes, 1),
            ("bias_o", &self.bias_o, self.output_nodes, 1),
        ];
        for (name, matrix, rows, cols) in expected {
            if !matrix.is_well_formed() {
                return Err(Error::MalformedRecord(format!(
                    "{name} claims {}x{} but its data disagrees",
                    matrix.rows, matrix.cols
                )));
            }
            if matrix.rows != rows || matrix.cols != cols {
                return Err(Error::MalformedRecord(format!(
                    "{name} must be {rows}x{cols} for these node counts, got {}x{}",
                    matrix.rows, matrix.cols
                )));
            }
        }

        Ok(())
    }

    /// Serializes the record to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a record from a JSON file previously written by
    /// `save_json`.
    ///
    /// No shape validation happens here; `import_weights` is where a
    /// hand-edited file gets rejected.
    pub fn load_json(path: &str) -> std::io::Result<NetworkRecord> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
