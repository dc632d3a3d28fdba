//! Runtime support for the vouch evaluator.
//!
//! - `Value`: runtime values of the quoted language (primitives, strings,
//!   arrays, collections, host objects, throwables)
//! - `Throwable`: a thrown exception, carried as data
//! - `ClassRegistry`: the reflective surface (classes, fields, methods,
//!   constructors, supertypes) that the evaluator resolves descriptors against
//! - `Quoted`: an IR arena plus the values captured when the predicate was
//!   quoted

mod object;
mod quoted;
mod registry;
mod throwable;
mod value;

pub use object::{HostObject, RecordObject};
pub use quoted::{Captured, Quoted, QuotedBuilder};
pub use registry::{ClassDef, ClassRegistry, NativeFn};
pub use throwable::{
    array_index_out_of_bounds, array_size_exceeds_limit, class_cast, class_not_found,
    division_by_zero, exception_names, illegal_argument, index_out_of_bounds,
    negative_array_size, no_such_method, null_pointer, number_format,
    string_index_out_of_bounds, Throwable,
};
pub use value::{java_double_string, java_float_string, ArrayValue, Heap, Value};
