use crate::error::{Error, Result};

/// Floating-point element types.
pub trait Element: Copy {
    fn to_f64(self) -> f64;
}

impl Element for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Element for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// Any in-memory multi-dimensional numeric value.
pub trait TensorSource {
    /// Axis lengths, outermost first.
    fn shape(&self) -> &[usize];

    /// All elements in row-major order. The length must equal the product of `shape()`.
    fn scalars(&self) -> Vec<f64>;
}

impl<S: TensorSource + ?Sized> TensorSource for &S {
    fn shape(&self) -> &[usize] {
        (**self).shape()
    }

    fn scalars(&self) -> Vec<f64> {
        (**self).scalars()
    }
}

/// An owned, contiguous, row-major tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T: Element> Tensor<T> {
    /// Creates a tensor from row-major data, checking that `data` fills `shape` exactly.
    pub fn new(shape: impl Into<Vec<usize>>, data: Vec<T>) -> Result<Self> {
        let shape = shape.into();
        let numel = numel(&shape);
        if data.len() != numel {
            return Err(Error::invalid_shape(
                "tensor",
                &shape,
                format!("expected {} elements, got {}", numel, data.len()),
            ));
        }
        Ok(Self { shape, data })
    }

    /// Creates a tensor by evaluating `f` at each multi-index, in row-major order.
    pub fn from_fn(shape: impl Into<Vec<usize>>, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let shape = shape.into();
        let n = numel(&shape);
        let mut data = Vec::with_capacity(n);
        let mut idx = vec![0usize; shape.len()];
        for _ in 0..n {
            data.push(f(&idx));
            for d in (0..shape.len()).rev() {
                idx[d] += 1;
                if idx[d] < shape[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
        Self { shape, data }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
}

impl<T: Element + Default> Tensor<T> {
    pub fn zeros(shape: impl Into<Vec<usize>>) -> Self {
        Self::from_fn(shape, |_| T::default())
    }
}

impl<T: Element> TensorSource for Tensor<T> {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn scalars(&self) -> Vec<f64> {
        self.data.iter().map(|&x| x.to_f64()).collect()
    }
}

#[cfg(feature = "ndarray")]
impl<A, S, D> TensorSource for ndarray::ArrayBase<S, D>
where
    A: Element,
    S: ndarray::Data<Elem = A>,
    D: ndarray::Dimension,
{
    fn shape(&self) -> &[usize] {
        ndarray::ArrayBase::shape(self)
    }

    fn scalars(&self) -> Vec<f64> {
        // `iter` walks logical (row-major) order regardless of memory layout.
        self.iter().map(|&x| x.to_f64()).collect()
    }
}

/// Number of elements in a tensor of the given shape. A rank-0 shape holds one element.
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// The dense representation handed to a [`WriterBackend`](crate::backend::WriterBackend):
/// shape plus row-major `f64` data.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseArray {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl DenseArray {
    /// Flattens a tensor source, rejecting sources whose element count disagrees with their
    /// shape.
    pub fn from_tensor<S: TensorSource + ?Sized>(tensor: &S) -> Result<Self> {
        let shape = tensor.shape().to_vec();
        let data = tensor.scalars();
        if data.len() != numel(&shape) {
            return Err(Error::invalid_shape(
                "tensor",
                &shape,
                format!("source yielded {} elements", data.len()),
            ));
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Row-major strides, in elements.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1usize; self.shape.len()];
        for i in (0..self.shape.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * self.shape[i + 1];
        }
        strides
    }

    /// Iterates over the rows of a 2-D array.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[f64]> {
        let width = self.shape.get(1).copied().unwrap_or(1).max(1);
        self.data.chunks(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lying;

    impl TensorSource for Lying {
        fn shape(&self) -> &[usize] {
            &[2, 2]
        }

        fn scalars(&self) -> Vec<f64> {
            vec![1.0, 2.0, 3.0]
        }
    }

    #[test]
    fn test_new_checks_length() {
        assert!(Tensor::new([2, 3], vec![0.0f32; 6]).is_ok());
        let err = Tensor::new([2, 3], vec![0.0f32; 5]).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { .. }), "{:?}", err);
    }

    #[test]
    fn test_from_fn_row_major() {
        let t = Tensor::from_fn([2, 3], |idx| (idx[0] * 10 + idx[1]) as f64);
        assert_eq!(t.data(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_dense_array_preserves_shape_and_order() {
        let t = Tensor::new([2, 1, 2], vec![1.5f32, -2.0, 3.0, 4.25]).unwrap();
        let dense = DenseArray::from_tensor(&t).unwrap();
        assert_eq!(dense.shape(), &[2, 1, 2]);
        assert_eq!(dense.data(), &[1.5, -2.0, 3.0, 4.25]);
        assert_eq!(dense.strides(), vec![2, 2, 1]);
    }

    #[test]
    fn test_dense_array_rejects_inconsistent_source() {
        let err = DenseArray::from_tensor(&Lying).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { .. }), "{:?}", err);
    }

    #[test]
    fn test_rank_zero() {
        let t = Tensor::new(Vec::<usize>::new(), vec![7.0f64]).unwrap();
        let dense = DenseArray::from_tensor(&t).unwrap();
        assert_eq!(dense.ndim(), 0);
        assert_eq!(dense.data(), &[7.0]);
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_ndarray_transposed_view() {
        let a = ndarray::Array2::from_shape_vec((2, 3), vec![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap();
        let t = a.t();
        let dense = DenseArray::from_tensor(&t).unwrap();
        assert_eq!(dense.shape(), &[3, 2]);
        assert_eq!(dense.data(), &[0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    }
}
