//! Array creation for `new T[d1][d2]...`.

use vouch_ir::TypeRef;
use vouch_runtime::{array_size_exceeds_limit, negative_array_size, Value};

use crate::errors::{Fault, OpResult};

/// Default cap on the number of elements one `new` may allocate.
pub const DEFAULT_MAX_ARRAY_ELEMENTS: usize = 16 * 1024 * 1024;

/// Allocate an array of type `ty` with the given dimension lengths.
///
/// `dims` may name fewer dimensions than `ty` has (`new int[3][]`); the
/// unallocated levels hold `null`. Leaves are the zero value of the
/// element type. Every dimension is checked for a negative length before
/// anything is allocated, then the element count (all levels together) is
/// checked against `max_elements`.
pub fn allocate(ty: &TypeRef, dims: &[i32], max_elements: usize) -> OpResult {
    if dims.is_empty() || dims.len() > depth(ty) {
        return Err(Fault::Unsupported);
    }
    if let Some(&negative) = dims.iter().find(|&&d| d < 0) {
        return Err(negative_array_size(negative).into());
    }
    let lengths: Vec<usize> = dims
        .iter()
        .map(|&d| usize::try_from(d).unwrap_or(0))
        .collect();
    if element_count(&lengths) > max_elements {
        return Err(array_size_exceeds_limit().into());
    }
    fill(ty, &lengths).ok_or(Fault::Unsupported)
}

fn depth(ty: &TypeRef) -> usize {
    let mut depth = 0;
    let mut current = ty;
    while let Some(component) = current.component() {
        depth += 1;
        current = component;
    }
    depth
}

/// Elements across all levels: `d1 + d1*d2 + d1*d2*d3 ...`, saturating.
fn element_count(lengths: &[usize]) -> usize {
    let mut level = 1_usize;
    let mut total = 0_usize;
    for &len in lengths {
        level = level.saturating_mul(len);
        total = total.saturating_add(level);
    }
    total
}

fn fill(ty: &TypeRef, lengths: &[usize]) -> Option<Value> {
    let component = ty.component()?;
    let (&len, rest) = lengths.split_first()?;
    let items = if rest.is_empty() {
        vec![Value::zero(component); len]
    } else {
        (0..len)
            .map(|_| fill(component, rest))
            .collect::<Option<Vec<_>>>()?
    };
    Some(Value::array(component.clone(), items))
}
