use std::fmt;

use crate::error::{NetError, Result};
use crate::nn::network::Network;

/// Snapshot of one connection and the unit it feeds into
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeInspection {
    pub layer: usize,
    pub i: usize,
    pub j: usize,
    pub weight: f64,
    /// All incoming weights of unit `i` in layer `layer + 1`
    pub row: Vec<f64>,
    pub bias: f64,
}

impl Network {
    /// Inspect the edge from unit `j` of layer `l` to unit `i` of layer `l + 1`
    pub fn inspect(&self, l: usize, i: usize, j: usize) -> Result<EdgeInspection> {
        let weight = self.weight(l, i, j)?;
        let row = self
            .weights()
            .get(l)
            .and_then(|w| w.row(i))
            .ok_or_else(|| NetError::IndexOutOfRange(format!("row {} of layer {}", i, l)))?
            .to_vec();
        let bias = self.bias(l, i)?;

        Ok(EdgeInspection {
            layer: l,
            i,
            j,
            weight,
            row,
            bias,
        })
    }
}

impl fmt::Display for EdgeInspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Layer {} -> {}  (i={}, j={})",
            self.layer,
            self.layer + 1,
            self.i,
            self.j
        )?;
        writeln!(f, "weight: {:.6}", self.weight)?;
        writeln!(f)?;
        writeln!(f, "Row weights to node {}:", self.i)?;
        for (idx, w) in self.row.iter().enumerate() {
            writeln!(f, "  w[{}] = {:.6}", idx, w)?;
        }
        writeln!(f)?;
        write!(f, "bias: {:.6}", self.bias)
    }
}
