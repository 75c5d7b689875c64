use std::fmt;

use rand::Rng;

/// Shape failure reported by a matrix operation.
///
/// Every fallible operation returns one of these instead of panicking or
/// handing back a truncated buffer; the caller decides whether to stop or
/// report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// A product requires the left operand's column count to equal the
    /// right operand's row count.
    DotDimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Element-wise operands must have identical shapes.
    ElementWiseMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::DotDimensionMismatch { left, right } => write!(
                f,
                "cannot multiply matrix shape [{},{}] and [{},{}]",
                left.0, left.1, right.0, right.1
            ),
            MatrixError::ElementWiseMismatch { left, right } => write!(
                f,
                "element-wise operands differ in shape: [{},{}] vs [{},{}]",
                left.0, left.1, right.0, right.1
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

/// A dense matrix: a flat row-major `f64` buffer paired with its dimensions.
///
/// `data[r * cols + c]` is the element at row `r`, column `c`. Keeping the
/// dimensions inside the type means a shape can never drift apart from the
/// buffer it describes; `data.len() == rows * cols` holds for every value
/// this module hands out.
///
/// All operations are pure: they allocate a fresh result and leave their
/// operands untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wraps an existing row-major buffer. The buffer length must equal
    /// `rows * cols`; this is a caller contract, not a checked error.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Matrix {
        debug_assert_eq!(data.len(), rows * cols);
        Matrix { rows, cols, data }
    }

    /// A column vector (n × 1).
    pub fn column(data: Vec<f64>) -> Matrix {
        let rows = data.len();
        Matrix {
            rows,
            cols: 1,
            data,
        }
    }

    /// Uniformly random entries in `[-scale, +scale]`.
    pub fn random(rows: usize, cols: usize, scale: f64, rng: &mut impl Rng) -> Matrix {
        let data = (0..rows * cols)
            .map(|_| scale * (rng.gen::<f64>() * 2.0 - 1.0))
            .collect();
        Matrix { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The underlying row-major buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix and returns its buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Standard matrix product: `C[i,j] = Σ_k A[i,k]·B[k,j]`.
    ///
    /// The result has shape (self.rows × rhs.cols).
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != rhs.rows {
            return Err(MatrixError::DotDimensionMismatch {
                left: (self.rows, self.cols),
                right: (rhs.rows, rhs.cols),
            });
        }

        let mut data = vec![0.0; self.rows * rhs.cols];
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * rhs.data[k * rhs.cols + j];
                }
                data[i * rhs.cols + j] = sum;
            }
        }

        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            data,
        })
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Element-wise sum.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(rhs, |x, y| x + y)
    }

    /// Element-wise difference.
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(rhs, |x, y| x - y)
    }

    /// Element-wise (Hadamard) product.
    pub fn mul(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(rhs, |x, y| x * y)
    }

    /// Element-wise quotient. An element with a zero divisor comes out as
    /// `0.0` rather than an infinity or NaN.
    pub fn div(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(rhs, |x, y| if y == 0.0 { 0.0 } else { x / y })
    }

    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    fn zip_with<F>(&self, rhs: &Matrix, f: F) -> Result<Matrix, MatrixError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(MatrixError::ElementWiseMismatch {
                left: (self.rows, self.cols),
                right: (rhs.rows, rhs.cols),
            });
        }
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&x, &y)| f(x, y))
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}
