//! Weight loading from in-memory safetensors artifacts.

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use safetensors::SafeTensors;
use std::collections::HashMap;
use tracing::debug;

/// Parses a safetensors buffer and creates a `VarBuilder` over its tensors.
///
/// Tensors are copied onto `device`, so `data` can be dropped as soon as
/// this returns.
///
/// # Errors
///
/// Returns an error if the buffer is not valid safetensors or holds a
/// dtype candle cannot represent.
pub fn varbuilder_from_bytes(data: &[u8], device: &Device) -> Result<VarBuilder<'static>> {
    let tensors = SafeTensors::deserialize(data).context("Failed to parse safetensors")?;

    let mut tensor_map: HashMap<String, Tensor> = HashMap::new();

    for name in tensors.names() {
        let view = tensors
            .tensor(name)
            .with_context(|| format!("Failed to get tensor '{name}'"))?;

        let dtype = safetensors_dtype_to_candle(view.dtype())?;
        let tensor = Tensor::from_raw_buffer(view.data(), dtype, view.shape(), device)
            .with_context(|| format!("Failed to create tensor '{name}'"))?;

        tensor_map.insert(name.clone(), tensor);
    }

    debug!("Loaded {} tensors ({} bytes)", tensor_map.len(), data.len());

    Ok(VarBuilder::from_tensors(tensor_map, DType::F32, device))
}

/// Converts safetensors dtype to candle dtype.
fn safetensors_dtype_to_candle(dtype: safetensors::Dtype) -> Result<DType> {
    use safetensors::Dtype as S;
    match dtype {
        S::F32 => Ok(DType::F32),
        S::F64 => Ok(DType::F64),
        S::F16 => Ok(DType::F16),
        S::BF16 => Ok(DType::BF16),
        S::I64 => Ok(DType::I64),
        S::U8 => Ok(DType::U8),
        S::U32 => Ok(DType::U32),
        other => anyhow::bail!("Unsupported dtype: {other:?}"),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn serialized(dtype: safetensors::Dtype, data: &[u8], shape: Vec<usize>) -> Vec<u8> {
        use safetensors::tensor::TensorView;

        let tensor = TensorView::new(dtype, shape, data).expect("valid tensor view");
        let tensors = HashMap::from([("test_tensor".to_string(), tensor)]);
        safetensors::serialize(&tensors, &None).expect("serialize")
    }

    #[test]
    fn test_load_f32_tensor() {
        let values: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0];
        let bytes = serialized(safetensors::Dtype::F32, bytemuck::cast_slice(&values), vec![2, 2]);

        let vb = varbuilder_from_bytes(&bytes, &Device::Cpu).expect("load");
        let t = vb.get((2, 2), "test_tensor").expect("tensor present");
        assert_eq!(t.dims(), &[2, 2]);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(varbuilder_from_bytes(b"not safetensors", &Device::Cpu).is_err());
    }

    #[test]
    fn test_unsupported_dtype_is_rejected() {
        let values: Vec<u8> = vec![1, 0, 1, 0];
        let bytes = serialized(safetensors::Dtype::BOOL, &values, vec![4]);
        assert!(varbuilder_from_bytes(&bytes, &Device::Cpu).is_err());
    }
}
