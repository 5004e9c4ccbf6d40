use crate::tensor::{Element, Tensor, TensorSource};

/// A value with named numeric tensors worth plotting as histograms.
///
/// [`SummaryWriter::add_histograms`](crate::SummaryWriter::add_histograms) writes one histogram
/// per tensor, tagged `"{tag}.{name}"`.
pub trait HistogramWritable {
    fn named_tensors(&self) -> Vec<(&'static str, &dyn TensorSource)>;
}

fn named<'a>(
    name: &'static str,
    tensor: &'a dyn TensorSource,
) -> (&'static str, &'a dyn TensorSource) {
    (name, tensor)
}

/// Fully-connected layer parameters: `weight` is `[in_features, out_features]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<T> {
    pub weight: Tensor<T>,
    pub bias: Tensor<T>,
}

impl<T: Element> HistogramWritable for Dense<T> {
    fn named_tensors(&self) -> Vec<(&'static str, &dyn TensorSource)> {
        vec![named("weight", &self.weight), named("bias", &self.bias)]
    }
}

macro_rules! filter_layer {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {$(
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name<T> {
            pub filter: Tensor<T>,
            pub bias: Tensor<T>,
        }

        impl<T: Element> HistogramWritable for $name<T> {
            fn named_tensors(&self) -> Vec<(&'static str, &dyn TensorSource)> {
                vec![named("filter", &self.filter), named("bias", &self.bias)]
            }
        }
    )*};
}

filter_layer! {
    /// 1-D convolution parameters.
    Conv1D,
    /// 2-D convolution parameters.
    Conv2D,
    /// 3-D convolution parameters.
    Conv3D,
    /// 2-D transposed convolution parameters.
    TransposedConv2D,
    /// 2-D depthwise convolution parameters.
    DepthwiseConv2D,
}

macro_rules! separable_layer {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {$(
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name<T> {
            pub depthwise_filter: Tensor<T>,
            pub pointwise_filter: Tensor<T>,
            pub bias: Tensor<T>,
        }

        impl<T: Element> HistogramWritable for $name<T> {
            fn named_tensors(&self) -> Vec<(&'static str, &dyn TensorSource)> {
                vec![
                    named("depthwise_filter", &self.depthwise_filter),
                    named("pointwise_filter", &self.pointwise_filter),
                    named("bias", &self.bias),
                ]
            }
        }
    )*};
}

separable_layer! {
    /// 1-D depthwise-separable convolution parameters.
    SeparableConv1D,
    /// 2-D depthwise-separable convolution parameters.
    SeparableConv2D,
}
