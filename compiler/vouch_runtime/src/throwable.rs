//! Thrown exceptions.
//!
//! A `Throwable` is plain data: class name plus optional message. Runtime
//! traps (division by zero, failed casts, bad indices) and exceptions thrown
//! by native methods are all represented this way, so evaluation failures
//! never unwind the Rust stack.

use std::fmt;
use std::sync::Arc;

/// Class names of the exceptions the engine itself throws.
pub mod exception_names {
    pub const THROWABLE: &str = "java.lang.Throwable";
    pub const EXCEPTION: &str = "java.lang.Exception";
    pub const ERROR: &str = "java.lang.Error";
    pub const RUNTIME_EXCEPTION: &str = "java.lang.RuntimeException";
    pub const ARITHMETIC: &str = "java.lang.ArithmeticException";
    pub const NULL_POINTER: &str = "java.lang.NullPointerException";
    pub const CLASS_CAST: &str = "java.lang.ClassCastException";
    pub const INDEX_OUT_OF_BOUNDS: &str = "java.lang.IndexOutOfBoundsException";
    pub const ARRAY_INDEX_OUT_OF_BOUNDS: &str = "java.lang.ArrayIndexOutOfBoundsException";
    pub const STRING_INDEX_OUT_OF_BOUNDS: &str = "java.lang.StringIndexOutOfBoundsException";
    pub const NEGATIVE_ARRAY_SIZE: &str = "java.lang.NegativeArraySizeException";
    pub const ILLEGAL_ARGUMENT: &str = "java.lang.IllegalArgumentException";
    pub const NUMBER_FORMAT: &str = "java.lang.NumberFormatException";
    pub const ILLEGAL_STATE: &str = "java.lang.IllegalStateException";
    pub const UNSUPPORTED_OPERATION: &str = "java.lang.UnsupportedOperationException";
    pub const REFLECTIVE_OPERATION: &str = "java.lang.ReflectiveOperationException";
    pub const CLASS_NOT_FOUND: &str = "java.lang.ClassNotFoundException";
    pub const NO_SUCH_METHOD: &str = "java.lang.NoSuchMethodException";
    pub const LINKAGE_ERROR: &str = "java.lang.LinkageError";
    pub const INCOMPATIBLE_CLASS_CHANGE: &str = "java.lang.IncompatibleClassChangeError";
    pub const NO_SUCH_FIELD: &str = "java.lang.NoSuchFieldError";
    pub const VIRTUAL_MACHINE_ERROR: &str = "java.lang.VirtualMachineError";
    pub const OUT_OF_MEMORY: &str = "java.lang.OutOfMemoryError";
}

use exception_names as names;

/// An exception: class plus optional detail message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Throwable {
    class: Arc<str>,
    message: Option<String>,
}

impl Throwable {
    pub fn new(class: &str, message: Option<String>) -> Self {
        Throwable {
            class: Arc::from(class),
            message,
        }
    }

    pub fn with_message(class: &str, message: impl Into<String>) -> Self {
        Self::new(class, Some(message.into()))
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// `Throwable.toString()`: `class: message`, or just the class.
impl fmt::Display for Throwable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.class),
            None => f.write_str(&self.class),
        }
    }
}

impl std::error::Error for Throwable {}

// Factory functions for runtime traps

/// Integer `/` or `%` with a zero divisor.
#[cold]
pub fn division_by_zero() -> Throwable {
    Throwable::with_message(names::ARITHMETIC, "/ by zero")
}

/// Member access or array access on `null`.
#[cold]
pub fn null_pointer() -> Throwable {
    Throwable::new(names::NULL_POINTER, None)
}

#[cold]
pub fn class_cast(from: &str, to: &str) -> Throwable {
    Throwable::with_message(
        names::CLASS_CAST,
        format!("class {from} cannot be cast to class {to}"),
    )
}

#[cold]
pub fn array_index_out_of_bounds(index: i32, length: usize) -> Throwable {
    Throwable::with_message(
        names::ARRAY_INDEX_OUT_OF_BOUNDS,
        format!("Index {index} out of bounds for length {length}"),
    )
}

#[cold]
pub fn index_out_of_bounds(index: i64, length: usize) -> Throwable {
    Throwable::with_message(
        names::INDEX_OUT_OF_BOUNDS,
        format!("Index {index} out of bounds for length {length}"),
    )
}

#[cold]
pub fn string_index_out_of_bounds(message: impl Into<String>) -> Throwable {
    Throwable::with_message(names::STRING_INDEX_OUT_OF_BOUNDS, message)
}

#[cold]
pub fn negative_array_size(size: i32) -> Throwable {
    Throwable::with_message(names::NEGATIVE_ARRAY_SIZE, size.to_string())
}

/// Array allocation above the configured element cap.
#[cold]
pub fn array_size_exceeds_limit() -> Throwable {
    Throwable::with_message(names::OUT_OF_MEMORY, "Requested array size exceeds VM limit")
}

#[cold]
pub fn class_not_found(name: &str) -> Throwable {
    Throwable::with_message(names::CLASS_NOT_FOUND, name)
}

/// Missing constructor or method, described by its signature.
#[cold]
pub fn no_such_method(signature: impl Into<String>) -> Throwable {
    Throwable::with_message(names::NO_SUCH_METHOD, signature)
}

#[cold]
pub fn number_format(input: &str) -> Throwable {
    Throwable::with_message(names::NUMBER_FORMAT, format!("For input string: \"{input}\""))
}

#[cold]
pub fn illegal_argument(message: impl Into<String>) -> Throwable {
    Throwable::with_message(names::ILLEGAL_ARGUMENT, message)
}
