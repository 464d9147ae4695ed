use std::{
    fmt,
    ops::{Index, IndexMut},
};

use anyhow::{ensure, Result};

/// Dense square matrix of `f64`, stored row-major.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Matrix {
    dimension: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: vec![0.0; dimension * dimension],
        }
    }

    /// Builds a matrix from rows, rejecting anything that is not square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dimension = rows.len();
        let mut matrix = Self::new(dimension);
        for (i, row) in rows.into_iter().enumerate() {
            ensure!(
                row.len() == dimension,
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                dimension
            );
            matrix[i].copy_from_slice(&row);
        }
        Ok(matrix)
    }

    pub fn update<F: FnOnce(f64) -> f64>(&mut self, i: usize, j: usize, op: F) {
        self[i][j] = op(self[i][j])
    }

    /// Applies `op` to every entry in place.
    pub fn update_all<F: FnMut(f64) -> f64>(&mut self, mut op: F) {
        for v in &mut self.data {
            *v = op(*v)
        }
    }

    pub fn size(&self) -> usize {
        self.dimension
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero
        self.data.chunks_exact(self.dimension.max(1))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.dimension)
            .all(|i| (i + 1..self.dimension).all(|j| self[i][j] == self[j][i]))
    }
}

impl Index<usize> for Matrix {
    type Output = [f64];
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index * self.dimension..(index + 1) * self.dimension]
    }
}

impl IndexMut<usize> for Matrix {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index * self.dimension..(index + 1) * self.dimension]
    }
}

/// One row per line, every entry as `{:8.3}` followed by a space.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for v in row {
                write!(f, "{:8.3} ", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
