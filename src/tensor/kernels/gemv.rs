/// General Matrix-Vector (GEMV) operations
///
/// Internal core GEMV operation using explicit strides
/// Computes: y += alpha * A @ x
///
/// # Arguments
/// * `a_data` - Flattened data of matrix A
/// * `m` - Number of rows in the result (rows of op(A))
/// * `k` - Inner dimension (cols of op(A), length of x)
/// * `a_row_stride` - Stride between consecutive rows of op(A)
/// * `a_col_stride` - Stride between consecutive cols of op(A)
/// * `x` - Input vector of length k
/// * `y` - Output buffer to accumulate into (length m)
/// * `alpha` - Scaling factor (usually 1.0)
struct GemvParams<'a> {
    a_data: &'a [f64],
    m: usize,
    k: usize,
    a_row_stride: usize,
    a_col_stride: usize,
    x: &'a [f64],
    y: &'a mut [f64],
    alpha: f64,
}

fn gemv_core(params: GemvParams) {
    let GemvParams {
        a_data,
        m,
        k,
        a_row_stride,
        a_col_stride,
        x,
        y,
        alpha,
    } = params;

    assert_eq!(x.len(), k, "Input vector length mismatch");
    assert_eq!(y.len(), m, "Output buffer size mismatch");

    for i in 0..m {
        let mut sum = 0.0;
        for p in 0..k {
            sum += a_data[i * a_row_stride + p * a_col_stride] * x[p];
        }
        y[i] += alpha * sum;
    }
}

/// Performs matrix-vector multiplication: y = A @ x
///
/// # Arguments
/// * `a_data` - Flattened data of matrix A (row-major)
/// * `a_shape` - Shape of matrix A as [rows, cols]
/// * `x` - Vector of length `a_shape[1]`
///
/// # Panics
/// * If `x.len() != a_shape[1]`
pub fn matvec(a_data: &[f64], a_shape: [usize; 2], x: &[f64]) -> Vec<f64> {
    assert_eq!(
        a_shape[1],
        x.len(),
        "Incompatible dimensions: A has {} columns but x has {} entries",
        a_shape[1],
        x.len()
    );

    let mut result = vec![0.0; a_shape[0]];
    gemv_core(GemvParams {
        a_data,
        m: a_shape[0],
        k: a_shape[1],
        a_row_stride: a_shape[1],
        a_col_stride: 1,
        x,
        y: &mut result,
        alpha: 1.0,
    });
    result
}

/// Performs transposed matrix-vector multiplication: y = A^T @ x
///
/// This is how an error signal travels backwards through a layer's weights.
///
/// # Panics
/// * If `x.len() != a_shape[0]`
pub fn matvec_transposed(a_data: &[f64], a_shape: [usize; 2], x: &[f64]) -> Vec<f64> {
    assert_eq!(
        a_shape[0],
        x.len(),
        "Incompatible dimensions: A has {} rows but x has {} entries",
        a_shape[0],
        x.len()
    );

    let mut result = vec![0.0; a_shape[1]];
    // A^T has strides: row_stride = 1 (column becomes row), col_stride = a_shape[1]
    gemv_core(GemvParams {
        a_data,
        m: a_shape[1],
        k: a_shape[0],
        a_row_stride: 1,
        a_col_stride: a_shape[1],
        x,
        y: &mut result,
        alpha: 1.0,
    });
    result
}

/// Outer product u ⊗ v, flattened row-major with shape [u.len(), v.len()]
pub fn outer(u: &[f64], v: &[f64]) -> Vec<f64> {
    let mut result = Vec::with_capacity(u.len() * v.len());
    for &ui in u {
        result.extend(v.iter().map(|&vj| ui * vj));
    }
    result
}

/// y += alpha * x
pub fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    assert_eq!(x.len(), y.len(), "Vector length mismatch in axpy");
    y.iter_mut().zip(x.iter()).for_each(|(y, x)| *y += alpha * x);
}
